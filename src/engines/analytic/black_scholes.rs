//! Black-Scholes closed form for European options without dividends.
//!
//! Used as the reference price for the single-asset Monte Carlo estimator.

use crate::core::{OptionType, PricingEngine, PricingError, PricingResult};
use crate::instruments::VanillaOption;
use crate::math::normal_cdf;

#[inline]
fn d1_d2(spot: f64, strike: f64, rate: f64, vol: f64, expiry: f64) -> (f64, f64) {
    let sig_sqrt_t = vol * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * expiry) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Black-Scholes price.
///
/// Edge cases:
/// - `expiry <= 0` returns intrinsic value.
/// - `vol <= 0` returns the discounted deterministic payoff
///   `max(±(S - K e^{-rT}), 0)`.
///
/// # Examples
/// ```rust
/// use mcbasket::core::OptionType;
/// use mcbasket::engines::analytic::black_scholes_price;
///
/// let call = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
/// let put = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.05, 0.20, 1.0);
/// assert!(call > put);
/// ```
pub fn black_scholes_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 {
        return option_type.payoff(spot, strike);
    }
    let df = (-rate * expiry).exp();
    if vol <= 0.0 || strike <= 0.0 {
        return option_type.payoff(spot, strike * df);
    }

    let (d1, d2) = d1_d2(spot, strike, rate, vol, expiry);
    match option_type {
        OptionType::Call => spot * normal_cdf(d1) - strike * df * normal_cdf(d2),
        OptionType::Put => strike * df * normal_cdf(-d2) - spot * normal_cdf(-d1),
    }
}

/// Closed-form engine for [`VanillaOption`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholesEngine;

impl BlackScholesEngine {
    pub fn new() -> Self {
        Self
    }
}

impl PricingEngine<VanillaOption> for BlackScholesEngine {
    fn price(&self, instrument: &VanillaOption) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        Ok(PricingResult {
            price: black_scholes_price(
                instrument.option_type,
                instrument.spot,
                instrument.strike,
                instrument.rate,
                instrument.vol,
                instrument.expiry,
            ),
            stderr: None,
            diagnostics: Default::default(),
        })
    }
}
