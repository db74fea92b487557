//! `mcbasket` prices European options and two-asset worst-of basket puts by
//! Monte Carlo simulation of geometric Brownian motion.
//!
//! Three estimators share one structure (simulate, observe, average, discount):
//! - single-asset put/call on an Euler–Maruyama grid,
//! - average worst-of put on two independent assets on an Euler–Maruyama grid,
//! - the same basket by exact two-step log-normal sampling.
//!
//! Every estimate comes with its standard error. Random numbers come from an
//! explicit [`math::FastRng`] handle, never from global state, so identical
//! seeds reproduce identical prices.
//!
//! References: Glasserman (2004) ch. 3 and 6; Hull, *Options, Futures, and
//! Other Derivatives* (11th ed.) ch. 21 for Monte Carlo estimators.
//!
//! # Feature Flags
//! - `parallel`: runs engine chunks on Rayon. Results are bit-identical to
//!   the sequential build.
//!
//! # Quick Start
//! Single-stream pricing with an injected random stream:
//! ```rust
//! use mcbasket::math::FastRng;
//! use mcbasket::pricing::price_worst_of_basket_put_exact_two_step;
//!
//! let mut rng = FastRng::seeded(7);
//! let res = price_worst_of_basket_put_exact_two_step(
//!     12.18, 6.03, 0.436, 0.30, 0.75, 0.0417, 20_000, &mut rng,
//! )
//! .unwrap();
//! let (lo, hi) = res.confidence_interval(1.96);
//! assert!(lo < res.price && res.price < hi);
//! ```
//!
//! Engine pricing with seeded substreams:
//! ```rust
//! use mcbasket::core::PricingEngine;
//! use mcbasket::engines::monte_carlo::EulerWorstOfEngine;
//! use mcbasket::instruments::WorstOfAveragePut;
//!
//! let basket = WorstOfAveragePut::new(12.18, 6.03, 0.436, 0.30, 0.0417, 0.75);
//! let engine = EulerWorstOfEngine::new(20_000, 150, 42);
//! let a = engine.price(&basket).unwrap();
//! let b = engine.price(&basket).unwrap();
//! assert_eq!(a.price, b.price);
//! ```

pub mod core;
pub mod engines;
pub mod instruments;
pub mod math;
pub mod mc;
pub mod models;
pub mod pricing;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::{
        DiagKey, Diagnostics, Instrument, OptionType, PricingEngine, PricingError, PricingResult,
    };
    pub use crate::engines::analytic::{BlackScholesEngine, black_scholes_price};
    pub use crate::engines::monte_carlo::{
        EulerVanillaEngine, EulerWorstOfEngine, ExactWorstOfEngine, WorstOfCheckpoints,
        interim_checkpoint_index,
    };
    pub use crate::instruments::{VanillaOption, WorstOfAveragePut};
    pub use crate::math::{FastRng, FastRngKind};
    pub use crate::pricing::{
        price_single_asset_put_or_call, price_worst_of_basket_put_discretized,
        price_worst_of_basket_put_exact_two_step,
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn prelude_covers_the_pricing_surface() {
        let basket = WorstOfAveragePut::new(12.18, 6.03, 0.436, 0.30, 0.0417, 0.75);
        let euler = EulerWorstOfEngine::new(1_000, 12, 3).price(&basket).unwrap();
        assert_eq!(euler.diagnostics.get(DiagKey::InterimStep), Some(3.0));
        assert_eq!(interim_checkpoint_index(12, basket.interim_fraction), 3);

        let mut rng = FastRng::from_seed(FastRngKind::Pcg64, 3);
        let put = price_single_asset_put_or_call(
            OptionType::Put, 12.18, 12.18, 0.75, 0.0417, 0.436, 12, 1_000, &mut rng,
        )
        .unwrap();
        let option = VanillaOption::european_put(12.18, 12.18, 0.0417, 0.436, 0.75);
        let bs = BlackScholesEngine::new().price(&option).unwrap();
        assert!((put.price - bs.price).abs() < 6.0 * put.stderr.unwrap() + 0.05);
    }
}
