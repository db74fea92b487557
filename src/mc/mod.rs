//! Path simulation primitives and the chunked Monte Carlo runner.

pub mod engine;
pub mod path;

pub use engine::{DEFAULT_CHUNK_SIZE, MonteCarloEngine};
pub use path::{PricePath, advance_euler_row, advance_exact_row, simulate_euler_paths};

use crate::core::PricingError;

pub(crate) fn require_grid(steps: usize, num_paths: usize) -> Result<(), PricingError> {
    if steps == 0 {
        return Err(PricingError::InvalidParameter(
            "steps must be > 0".to_string(),
        ));
    }
    if num_paths == 0 {
        return Err(PricingError::InvalidParameter(
            "paths must be > 0".to_string(),
        ));
    }
    Ok(())
}
