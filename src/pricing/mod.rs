//! Function-level pricing entry points.
//!
//! Each function validates its inputs, simulates all paths sequentially from
//! the caller's random stream, and returns the discounted mean payoff with its
//! standard error. Calling twice with identically seeded streams returns
//! bit-identical results.
//!
//! For seeded, chunked (and optionally parallel) runs use the engines in
//! [`crate::engines::monte_carlo`] instead.

use crate::core::{DiagKey, Diagnostics, Instrument, OptionType, PricingError, PricingResult};
use crate::engines::monte_carlo::{
    discounted_result, interim_checkpoint_index, simulate_vanilla_euler, simulate_worst_of_euler,
    simulate_worst_of_exact,
};
use crate::instruments::{VanillaOption, WorstOfAveragePut};
use crate::math::FastRng;

/// Single-asset European put or call by Euler–Maruyama simulation.
///
/// # Errors
/// [`PricingError::InvalidParameter`] for `steps == 0`, `paths == 0`,
/// `horizon < 0`, `vol < 0`, `spot <= 0`, `strike < 0` or non-finite inputs;
/// [`PricingError::NumericOverflow`] when a simulated price is not finite.
///
/// # Examples
/// ```
/// use mcbasket::core::OptionType;
/// use mcbasket::math::FastRng;
/// use mcbasket::pricing::price_single_asset_put_or_call;
///
/// let mut rng = FastRng::seeded(42);
/// let put = price_single_asset_put_or_call(
///     OptionType::Put, 12.18, 12.18, 0.75, 0.0417, 0.436, 150, 10_000, &mut rng,
/// )
/// .unwrap();
/// assert!(put.price > 1.0 && put.price < 2.5);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn price_single_asset_put_or_call(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    horizon: f64,
    rate: f64,
    vol: f64,
    steps: usize,
    paths: usize,
    rng: &mut FastRng,
) -> Result<PricingResult, PricingError> {
    let option = VanillaOption::european(option_type, spot, strike, rate, vol, horizon);
    option.validate()?;
    tracing::debug!(
        instrument = option.instrument_type(),
        ?option_type,
        steps,
        paths,
        "single-stream Euler estimate"
    );

    let stats = simulate_vanilla_euler(&option, steps, paths, rng)?;
    let mut diagnostics = Diagnostics::new();
    diagnostics.insert(DiagKey::NumSteps, steps as f64);
    discounted_result(&stats, option.discount_factor(), diagnostics)
}

/// Two-asset average worst-of put by Euler–Maruyama simulation.
///
/// The interim checkpoint is grid index `floor(steps * 0.25)`.
#[allow(clippy::too_many_arguments)]
pub fn price_worst_of_basket_put_discretized(
    spot1: f64,
    spot2: f64,
    vol1: f64,
    vol2: f64,
    horizon: f64,
    rate: f64,
    steps: usize,
    paths: usize,
    rng: &mut FastRng,
) -> Result<PricingResult, PricingError> {
    let basket = WorstOfAveragePut::new(spot1, spot2, vol1, vol2, rate, horizon);
    basket.validate()?;
    let interim_step = interim_checkpoint_index(steps, basket.interim_fraction);
    tracing::debug!(
        instrument = basket.instrument_type(),
        steps,
        paths,
        interim_step,
        "single-stream Euler worst-of estimate"
    );

    let stats = simulate_worst_of_euler(&basket, steps, paths, rng)?.payoff_stats();
    let mut diagnostics = Diagnostics::new();
    diagnostics.insert(DiagKey::NumSteps, steps as f64);
    diagnostics.insert(DiagKey::InterimStep, interim_step as f64);
    discounted_result(&stats, basket.discount_factor(), diagnostics)
}

/// Two-asset average worst-of put by exact two-step log-normal sampling.
///
/// Checkpoints sit at `t = 0.25` and `t = 0.75`; `horizon` only discounts.
#[allow(clippy::too_many_arguments)]
pub fn price_worst_of_basket_put_exact_two_step(
    spot1: f64,
    spot2: f64,
    vol1: f64,
    vol2: f64,
    horizon: f64,
    rate: f64,
    paths: usize,
    rng: &mut FastRng,
) -> Result<PricingResult, PricingError> {
    let basket = WorstOfAveragePut::new(spot1, spot2, vol1, vol2, rate, horizon);
    basket.validate()?;
    tracing::debug!(
        instrument = basket.instrument_type(),
        paths,
        "single-stream exact two-step worst-of estimate"
    );

    let stats = simulate_worst_of_exact(&basket, paths, rng)?.payoff_stats();
    let mut diagnostics = Diagnostics::new();
    diagnostics.insert(DiagKey::NumSteps, 2.0);
    discounted_result(&stats, basket.discount_factor(), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_grid() {
        let mut rng = FastRng::seeded(1);
        let err = price_single_asset_put_or_call(
            OptionType::Put, 10.0, 10.0, 1.0, 0.0, 0.2, 0, 100, &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(_)));

        let err = price_worst_of_basket_put_discretized(
            10.0, 5.0, 0.2, 0.2, 1.0, 0.0, 10, 0, &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(_)));

        let err =
            price_worst_of_basket_put_exact_two_step(10.0, 5.0, 0.2, 0.2, 1.0, 0.0, 0, &mut rng)
                .unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(_)));
    }

    #[test]
    fn rejects_negative_horizon_and_vol() {
        let mut rng = FastRng::seeded(1);
        assert!(
            price_single_asset_put_or_call(
                OptionType::Put, 10.0, 10.0, -1.0, 0.0, 0.2, 10, 100, &mut rng,
            )
            .is_err()
        );
        assert!(
            price_worst_of_basket_put_exact_two_step(10.0, 5.0, -0.2, 0.2, 1.0, 0.0, 10, &mut rng)
                .is_err()
        );
    }

    #[test]
    fn extreme_drift_surfaces_overflow() {
        let mut rng = FastRng::seeded(1);
        let err = price_single_asset_put_or_call(
            OptionType::Call, 1.0e300, 1.0, 1.0, 1.0e10, 0.0, 1, 10, &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::NumericOverflow(_)));
    }
}
