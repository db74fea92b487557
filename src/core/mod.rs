//! Core traits, common domain types, and library-wide result/error structures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Intrinsic value: `max(spot - strike, 0)` for calls, `max(strike - spot, 0)` for puts.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

impl std::str::FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(Self::Call),
            "p" | "put" => Ok(Self::Put),
            other => Err(PricingError::InvalidParameter(format!(
                "unknown option type `{other}`"
            ))),
        }
    }
}

/// Common trait implemented by every priceable instrument.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics and logs.
    fn instrument_type(&self) -> &str;
}

/// Pricing engine abstraction over an instrument type.
///
/// Instruments carry their own economic parameters (spots, vols, rate,
/// horizon); engines carry simulation settings.
pub trait PricingEngine<I: Instrument> {
    /// Prices an instrument.
    fn price(&self, instrument: &I) -> Result<PricingResult, PricingError>;
}

/// Compact key set for engine diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagKey {
    DiscountFactor,
    InterimStep,
    NumChunks,
    NumPaths,
    NumSteps,
}

impl DiagKey {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DiscountFactor => "discount_factor",
            Self::InterimStep => "interim_step",
            Self::NumChunks => "num_chunks",
            Self::NumPaths => "num_paths",
            Self::NumSteps => "num_steps",
        }
    }
}

const DIAGNOSTICS_CAPACITY: usize = 6;

/// Inline diagnostics storage used in [`PricingResult`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: [Option<(DiagKey, f64)>; DIAGNOSTICS_CAPACITY],
}

impl Diagnostics {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries[0].is_none()
    }

    /// Inserts or overwrites a value, returning the previous one.
    ///
    /// Silently drops the value once all slots are taken by other keys.
    #[inline]
    pub fn insert(&mut self, key: DiagKey, value: f64) -> Option<f64> {
        for (entry_key, existing) in self.entries.iter_mut().flatten() {
            if *entry_key == key {
                let prev = *existing;
                *existing = value;
                return Some(prev);
            }
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.is_none()) {
            *entry = Some((key, value));
        }
        None
    }

    #[inline]
    pub fn get(&self, key: DiagKey) -> Option<f64> {
        self.iter()
            .find_map(|(entry_key, value)| (entry_key == key).then_some(value))
    }

    #[inline]
    pub fn contains_key(&self, key: DiagKey) -> bool {
        self.get(key).is_some()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (DiagKey, f64)> + '_ {
        self.entries.iter().filter_map(|e| *e)
    }
}

impl Serialize for Diagnostics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), &value)?;
        }
        map.end()
    }
}

/// Unified engine result payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Discounted standard error of the sample mean.
    pub stderr: Option<f64>,
    /// Engine-specific scalar diagnostics.
    pub diagnostics: Diagnostics,
}

impl PricingResult {
    /// Symmetric interval `price ± z * stderr`.
    ///
    /// Collapses to the point estimate when no standard error is available.
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let half = self.stderr.map_or(0.0, |se| z * se);
        (self.price - half, self.price + half)
    }
}

/// Engine and model errors surfaced by the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Input validation error.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Simulated values left the finite range.
    #[error("numeric overflow: {0}")]
    NumericOverflow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payoff_floors_at_zero() {
        assert_eq!(OptionType::Put.payoff(12.0, 10.0), 0.0);
        assert_eq!(OptionType::Put.payoff(8.0, 10.0), 2.0);
        assert_eq!(OptionType::Call.payoff(12.0, 10.0), 2.0);
        assert_eq!(OptionType::Call.payoff(8.0, 10.0), 0.0);
    }

    #[test]
    fn option_type_parses_short_and_long_forms() {
        assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn diagnostics_overwrite_returns_previous() {
        let mut diag = Diagnostics::new();
        assert!(diag.is_empty());
        assert_eq!(diag.insert(DiagKey::NumPaths, 10.0), None);
        assert_eq!(diag.insert(DiagKey::NumPaths, 20.0), Some(10.0));
        assert_eq!(diag.get(DiagKey::NumPaths), Some(20.0));
        assert_eq!(diag.len(), 1);
        assert!(!diag.contains_key(DiagKey::NumSteps));
    }

    #[test]
    fn confidence_interval_is_symmetric() {
        let result = PricingResult {
            price: 1.0,
            stderr: Some(0.1),
            diagnostics: Diagnostics::new(),
        };
        let (lo, hi) = result.confidence_interval(1.96);
        assert!((lo - 0.804).abs() < 1e-12);
        assert!((hi - 1.196).abs() < 1e-12);
    }
}
