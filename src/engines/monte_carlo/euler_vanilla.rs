//! Single-asset European option by Euler–Maruyama discretisation of GBM.
//!
//! Every path starts at spot and is stepped with
//! `S[i] = S[i-1] + r S[i-1] dt + sigma S[i-1] z sqrt(dt)`; only the terminal
//! row enters the payoff. Prices are not floored, so coarse grids with large
//! volatility can produce negative terminal spots, which the put payoff
//! handles as deep in the money.

use crate::core::{DiagKey, Diagnostics, Instrument, PricingEngine, PricingError, PricingResult};
use crate::instruments::VanillaOption;
use crate::math::{FastRng, FastRngKind, SampleStats};
use crate::mc::{MonteCarloEngine, advance_euler_row, require_grid};
use crate::models::Gbm;

use super::discounted_result;

/// Simulates `num_paths` Euler paths from `rng` and returns undiscounted
/// payoff statistics.
///
/// Draw order: for each step, one normal per path in path order.
pub fn simulate_vanilla_euler(
    option: &VanillaOption,
    steps: usize,
    num_paths: usize,
    rng: &mut FastRng,
) -> Result<SampleStats, PricingError> {
    require_grid(steps, num_paths)?;

    let model = Gbm::risk_neutral(option.rate, option.vol);
    let dt = option.expiry / steps as f64;
    let mut row = vec![option.spot; num_paths];

    for step in 1..=steps {
        advance_euler_row(&model, &mut row, dt, step, rng)?;
    }

    Ok(row.iter().map(|&s| option.payoff(s)).collect())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerVanillaEngine {
    pub mc: MonteCarloEngine,
    pub steps: usize,
}

impl EulerVanillaEngine {
    pub fn new(num_paths: usize, steps: usize, seed: u64) -> Self {
        Self {
            mc: MonteCarloEngine::new(num_paths, seed),
            steps,
        }
    }

    pub fn with_rng_kind(mut self, rng_kind: FastRngKind) -> Self {
        self.mc = self.mc.with_rng_kind(rng_kind);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.mc = self.mc.with_chunk_size(chunk_size);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.mc = self.mc.with_seed(seed);
        self
    }

    /// Draws every chunk seed from OS entropy; runs are no longer repeatable.
    pub fn with_randomized_streams(mut self) -> Self {
        self.mc = self.mc.with_randomized_streams();
        self
    }
}

impl PricingEngine<VanillaOption> for EulerVanillaEngine {
    fn price(&self, instrument: &VanillaOption) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        require_grid(self.steps, self.mc.num_paths)?;
        tracing::debug!(
            instrument = instrument.instrument_type(),
            option_type = ?instrument.option_type,
            paths = self.mc.num_paths,
            steps = self.steps,
            chunks = self.mc.num_chunks(),
            "pricing with Euler Monte Carlo"
        );

        let stats = self
            .mc
            .run(|n, rng| simulate_vanilla_euler(instrument, self.steps, n, rng))?;

        let mut diagnostics = Diagnostics::new();
        diagnostics.insert(DiagKey::NumSteps, self.steps as f64);
        diagnostics.insert(DiagKey::NumChunks, self.mc.num_chunks() as f64);
        discounted_result(&stats, instrument.discount_factor(), diagnostics)
    }
}
