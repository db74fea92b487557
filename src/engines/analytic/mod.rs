//! Closed-form reference engines.

pub mod black_scholes;

pub use black_scholes::{BlackScholesEngine, black_scholes_price};
