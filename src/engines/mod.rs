//! Pricing engine implementations.

pub mod analytic;
pub mod monte_carlo;
