//! Monte Carlo pricing engines.
//!
//! Each estimator is split into a kernel that simulates a batch of paths from
//! a caller-supplied [`FastRng`](crate::math::FastRng) and returns undiscounted
//! payoff statistics, and an engine that runs the kernel over seeded chunks
//! via [`MonteCarloEngine`](crate::mc::MonteCarloEngine).

pub mod euler_vanilla;
pub mod worst_of;

pub use euler_vanilla::{EulerVanillaEngine, simulate_vanilla_euler};
pub use worst_of::{
    EulerWorstOfEngine, ExactWorstOfEngine, WorstOfCheckpoints, interim_checkpoint_index,
    simulate_worst_of_euler, simulate_worst_of_exact,
};

use crate::core::{DiagKey, Diagnostics, PricingError, PricingResult};
use crate::math::SampleStats;

/// Discounts undiscounted payoff statistics into a [`PricingResult`].
pub(crate) fn discounted_result(
    stats: &SampleStats,
    discount_factor: f64,
    mut diagnostics: Diagnostics,
) -> Result<PricingResult, PricingError> {
    let price = discount_factor * stats.mean();
    let stderr = discount_factor * stats.std_error();
    if !price.is_finite() || !stderr.is_finite() {
        tracing::warn!(price, stderr, "non-finite estimate");
        return Err(PricingError::NumericOverflow(format!(
            "estimate is not finite (price={price}, stderr={stderr})"
        )));
    }

    diagnostics.insert(DiagKey::NumPaths, stats.count() as f64);
    diagnostics.insert(DiagKey::DiscountFactor, discount_factor);
    Ok(PricingResult {
        price,
        stderr: Some(stderr),
        diagnostics,
    })
}
