//! Single-asset European option under flat GBM dynamics.
//!
//! [`VanillaOption`] stores side, spot, strike, rate, volatility and expiry.
//! `expiry == 0` is accepted and prices at intrinsic value; `vol == 0` is
//! accepted and gives deterministic paths.

use serde::{Deserialize, Serialize};

use super::{require_finite, require_non_negative, require_positive};
use crate::core::{Instrument, OptionType, PricingError};

/// European call or put on one asset.
///
/// # Examples
/// ```
/// use mcbasket::core::OptionType;
/// use mcbasket::instruments::VanillaOption;
///
/// let put = VanillaOption::european_put(12.18, 12.18, 0.0417, 0.436, 0.75);
/// assert_eq!(put.option_type, OptionType::Put);
/// assert!(put.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Initial spot.
    pub spot: f64,
    /// Strike level.
    pub strike: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Lognormal volatility.
    pub vol: f64,
    /// Expiry in years.
    pub expiry: f64,
}

impl VanillaOption {
    pub fn european(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        expiry: f64,
    ) -> Self {
        Self {
            option_type,
            spot,
            strike,
            rate,
            vol,
            expiry,
        }
    }

    pub fn european_call(spot: f64, strike: f64, rate: f64, vol: f64, expiry: f64) -> Self {
        Self::european(OptionType::Call, spot, strike, rate, vol, expiry)
    }

    pub fn european_put(spot: f64, strike: f64, rate: f64, vol: f64, expiry: f64) -> Self {
        Self::european(OptionType::Put, spot, strike, rate, vol, expiry)
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidParameter`] when any field is non-finite,
    /// `spot <= 0`, `strike < 0`, `vol < 0` or `expiry < 0`.
    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive("spot", self.spot)?;
        require_non_negative("strike", self.strike)?;
        require_finite("rate", self.rate)?;
        require_non_negative("vol", self.vol)?;
        require_non_negative("expiry", self.expiry)?;
        Ok(())
    }

    /// Payoff on a terminal spot.
    #[inline]
    pub fn payoff(&self, terminal: f64) -> f64 {
        self.option_type.payoff(terminal, self.strike)
    }

    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }
}

impl Instrument for VanillaOption {
    fn instrument_type(&self) -> &str {
        "VanillaOption"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_inputs() {
        let base = VanillaOption::european_put(100.0, 100.0, 0.05, 0.2, 1.0);
        assert!(base.validate().is_ok());

        let cases = [
            VanillaOption { spot: 0.0, ..base },
            VanillaOption { strike: -1.0, ..base },
            VanillaOption { vol: -0.1, ..base },
            VanillaOption { expiry: -0.5, ..base },
            VanillaOption { rate: f64::NAN, ..base },
            VanillaOption { spot: f64::INFINITY, ..base },
        ];
        for option in cases {
            assert!(
                matches!(option.validate(), Err(PricingError::InvalidParameter(_))),
                "{option:?}"
            );
        }
    }

    #[test]
    fn zero_vol_and_zero_expiry_are_accepted() {
        let option = VanillaOption::european_call(100.0, 90.0, 0.05, 0.0, 0.0);
        assert!(option.validate().is_ok());
        assert_eq!(option.discount_factor(), 1.0);
        assert_eq!(option.payoff(100.0), 10.0);
    }
}
