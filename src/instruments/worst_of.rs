//! Two-asset average worst-of put.
//!
//! Payoff on unit notional:
//!
//! ```text
//! B_j = min(S1(t_j) / S1(0), S2(t_j) / S2(0))     j = 1, 2
//! A   = (B_1 + B_2) / 2
//! pay = max(1 - A, 0)
//! ```
//!
//! The two assets are simulated independently (no correlation term). How the
//! checkpoints `t_1`, `t_2` are placed depends on the engine: the Euler engine
//! observes at grid index `floor(steps * interim_fraction)` and at the final
//! step; the exact engine observes at `first_offset` and
//! `first_offset + second_offset`.

use serde::{Deserialize, Serialize};

use super::{require_finite, require_non_negative, require_positive};
use crate::core::{Instrument, PricingError};

pub const DEFAULT_INTERIM_FRACTION: f64 = 0.25;
pub const DEFAULT_FIRST_OFFSET: f64 = 0.25;
pub const DEFAULT_SECOND_OFFSET: f64 = 0.5;

fn default_interim_fraction() -> f64 {
    DEFAULT_INTERIM_FRACTION
}

fn default_first_offset() -> f64 {
    DEFAULT_FIRST_OFFSET
}

fn default_second_offset() -> f64 {
    DEFAULT_SECOND_OFFSET
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorstOfAveragePut {
    pub s1: f64,
    pub s2: f64,
    pub vol1: f64,
    pub vol2: f64,
    pub r: f64,
    /// Horizon used for discounting and for the Euler grid.
    pub t: f64,
    /// Interim checkpoint position on the Euler grid, as a fraction of steps.
    #[serde(default = "default_interim_fraction")]
    pub interim_fraction: f64,
    /// Time from inception to the first checkpoint (exact engine).
    #[serde(default = "default_first_offset")]
    pub first_offset: f64,
    /// Time from the first to the second checkpoint (exact engine).
    #[serde(default = "default_second_offset")]
    pub second_offset: f64,
}

impl WorstOfAveragePut {
    /// Builds the contract with the standard 25% interim checkpoint and
    /// `0.25 / 0.5` exact-sampling offsets.
    ///
    /// # Examples
    /// ```
    /// use mcbasket::instruments::WorstOfAveragePut;
    ///
    /// let basket = WorstOfAveragePut::new(12.18, 6.03, 0.436, 0.30, 0.0417, 0.75);
    /// assert!(basket.validate().is_ok());
    /// assert_eq!(basket.interim_fraction, 0.25);
    /// ```
    pub fn new(s1: f64, s2: f64, vol1: f64, vol2: f64, r: f64, t: f64) -> Self {
        Self {
            s1,
            s2,
            vol1,
            vol2,
            r,
            t,
            interim_fraction: DEFAULT_INTERIM_FRACTION,
            first_offset: DEFAULT_FIRST_OFFSET,
            second_offset: DEFAULT_SECOND_OFFSET,
        }
    }

    pub fn with_interim_fraction(mut self, fraction: f64) -> Self {
        self.interim_fraction = fraction;
        self
    }

    pub fn with_offsets(mut self, first: f64, second: f64) -> Self {
        self.first_offset = first;
        self.second_offset = second;
        self
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive("s1", self.s1)?;
        require_positive("s2", self.s2)?;
        require_non_negative("vol1", self.vol1)?;
        require_non_negative("vol2", self.vol2)?;
        require_finite("r", self.r)?;
        require_non_negative("t", self.t)?;
        require_non_negative("first_offset", self.first_offset)?;
        require_non_negative("second_offset", self.second_offset)?;
        require_finite("interim_fraction", self.interim_fraction)?;
        if !(0.0..=1.0).contains(&self.interim_fraction) {
            return Err(PricingError::InvalidParameter(format!(
                "interim_fraction must lie in [0, 1], got {}",
                self.interim_fraction
            )));
        }
        Ok(())
    }

    /// Worst relative performance of the two assets at one checkpoint.
    #[inline]
    pub fn worst_of(&self, p1: f64, p2: f64) -> f64 {
        (p1 / self.s1).min(p2 / self.s2)
    }

    /// Payoff from the two checkpoint worst-of values.
    #[inline]
    pub fn payoff(interim_worst: f64, terminal_worst: f64) -> f64 {
        let average = 0.5 * (interim_worst + terminal_worst);
        (1.0 - average).max(0.0)
    }

    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }
}

impl Instrument for WorstOfAveragePut {
    fn instrument_type(&self) -> &str {
        "WorstOfAveragePut"
    }
}
