//! Instrument definitions.
//!
//! Contracts are immutable pricing inputs carrying both terms and the
//! market parameters the simulators need.

pub mod vanilla;
pub mod worst_of;

pub use vanilla::VanillaOption;
pub use worst_of::WorstOfAveragePut;

use crate::core::PricingError;

pub(crate) fn require_finite(name: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), PricingError> {
    require_finite(name, value)?;
    if value <= 0.0 {
        return Err(PricingError::InvalidParameter(format!(
            "{name} must be > 0, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<(), PricingError> {
    require_finite(name, value)?;
    if value < 0.0 {
        return Err(PricingError::InvalidParameter(format!(
            "{name} must be >= 0, got {value}"
        )));
    }
    Ok(())
}
