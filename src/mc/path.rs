//! Price-path storage and the row-advancing kernels shared by every simulator.
//!
//! Paths are advanced one time step at a time across the whole batch
//! ("row" = all paths at one time index). Each row update consumes exactly one
//! standard normal per path, in path order, so a row-by-row simulation and a
//! fully materialised [`PricePath`] see identical draws from the same stream.

use crate::core::PricingError;
use crate::math::FastRng;
use crate::models::Gbm;

/// Dense `(steps + 1) × paths` price matrix, row-major by time step.
///
/// Row 0 holds the initial spot for every path.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePath {
    num_paths: usize,
    values: Vec<f64>,
}

impl PricePath {
    /// Allocates `steps + 1` rows with every path at `spot` in row 0.
    pub fn new(spot: f64, steps: usize, num_paths: usize) -> Self {
        let mut values = vec![0.0; (steps + 1) * num_paths];
        values[..num_paths].fill(spot);
        Self { num_paths, values }
    }

    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    pub fn steps(&self) -> usize {
        (self.values.len() / self.num_paths.max(1)).saturating_sub(1)
    }

    pub fn row(&self, step: usize) -> &[f64] {
        let start = step * self.num_paths;
        &self.values[start..start + self.num_paths]
    }

    pub fn initial(&self) -> &[f64] {
        self.row(0)
    }

    pub fn terminal(&self) -> &[f64] {
        self.row(self.steps())
    }

    /// Prices of one path across all time steps.
    pub fn path(&self, index: usize) -> Vec<f64> {
        (0..=self.steps()).map(|step| self.row(step)[index]).collect()
    }

    fn rows_mut(&mut self, step: usize) -> (&[f64], &mut [f64]) {
        let (head, tail) = self.values.split_at_mut(step * self.num_paths);
        (&head[(step - 1) * self.num_paths..], &mut tail[..self.num_paths])
    }
}

#[inline]
fn overflow(step: usize, path: usize, value: f64) -> PricingError {
    tracing::warn!(step, path, value, "simulated price left the finite range");
    PricingError::NumericOverflow(format!(
        "non-finite price {value} at step {step}, path {path}"
    ))
}

/// Advances every price in `row` by one Euler–Maruyama step.
///
/// `step` is only used to label overflow errors.
pub fn advance_euler_row(
    model: &Gbm,
    row: &mut [f64],
    dt: f64,
    step: usize,
    rng: &mut FastRng,
) -> Result<(), PricingError> {
    let sqrt_dt = dt.sqrt();
    for (path, s) in row.iter_mut().enumerate() {
        let z = rng.standard_normal();
        *s = model.step_euler(*s, dt, sqrt_dt, z);
        if !s.is_finite() {
            return Err(overflow(step, path, *s));
        }
    }
    Ok(())
}

/// Advances every price in `row` by one exact log-normal transition of length `dt`.
pub fn advance_exact_row(
    model: &Gbm,
    row: &mut [f64],
    dt: f64,
    step: usize,
    rng: &mut FastRng,
) -> Result<(), PricingError> {
    for (path, s) in row.iter_mut().enumerate() {
        let z = rng.standard_normal();
        *s = model.step_exact(*s, dt, z);
        if !s.is_finite() {
            return Err(overflow(step, path, *s));
        }
    }
    Ok(())
}

/// Materialises the full Euler path matrix for one asset.
///
/// The pricing kernels keep only a rolling row; this is the inspection
/// counterpart and consumes the stream identically.
pub fn simulate_euler_paths(
    spot: f64,
    rate: f64,
    vol: f64,
    horizon: f64,
    steps: usize,
    num_paths: usize,
    rng: &mut FastRng,
) -> Result<PricePath, PricingError> {
    crate::instruments::require_positive("spot", spot)?;
    crate::instruments::require_finite("rate", rate)?;
    crate::instruments::require_non_negative("vol", vol)?;
    crate::instruments::require_non_negative("horizon", horizon)?;
    super::require_grid(steps, num_paths)?;

    let model = Gbm::risk_neutral(rate, vol);
    let dt = horizon / steps as f64;
    let mut paths = PricePath::new(spot, steps, num_paths);

    for step in 1..=steps {
        let (prev, next) = paths.rows_mut(step);
        next.copy_from_slice(prev);
        advance_euler_row(&model, next, dt, step, rng)?;
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_zero_is_spot_and_shape_matches() {
        let mut rng = FastRng::seeded(11);
        let paths = simulate_euler_paths(12.18, 0.0417, 0.436, 0.75, 20, 64, &mut rng).unwrap();
        assert_eq!(paths.steps(), 20);
        assert_eq!(paths.num_paths(), 64);
        assert!(paths.initial().iter().all(|&s| s == 12.18));
        assert_eq!(paths.path(5).len(), 21);
        assert_eq!(paths.path(5)[0], 12.18);
    }

    #[test]
    fn rolling_row_matches_materialised_terminal() {
        let model = Gbm::risk_neutral(0.03, 0.25);
        let dt = 1.0 / 12.0;

        let mut rng = FastRng::seeded(99);
        let full = simulate_euler_paths(100.0, 0.03, 0.25, 1.0, 12, 32, &mut rng).unwrap();

        let mut rng = FastRng::seeded(99);
        let mut row = vec![100.0; 32];
        for step in 1..=12 {
            advance_euler_row(&model, &mut row, dt, step, &mut rng).unwrap();
        }

        assert_eq!(full.terminal(), row.as_slice());
    }

    #[test]
    fn zero_vol_euler_path_is_compound_growth() {
        let mut rng = FastRng::seeded(1);
        let paths = simulate_euler_paths(10.0, 0.04, 0.0, 1.0, 4, 3, &mut rng).unwrap();
        let expected = 10.0 * (1.0_f64 + 0.04 / 4.0).powi(4);
        for &s in paths.terminal() {
            assert!((s - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn overflow_is_reported() {
        let model = Gbm::risk_neutral(1000.0, 0.0);
        let mut row = vec![1.0e300; 4];
        let mut rng = FastRng::seeded(3);
        let err = advance_exact_row(&model, &mut row, 1.0, 1, &mut rng).unwrap_err();
        assert!(matches!(err, PricingError::NumericOverflow(_)));
    }

    #[test]
    fn rejects_empty_grid() {
        let mut rng = FastRng::seeded(3);
        assert!(simulate_euler_paths(10.0, 0.0, 0.2, 1.0, 0, 10, &mut rng).is_err());
        assert!(simulate_euler_paths(10.0, 0.0, 0.2, 1.0, 10, 0, &mut rng).is_err());
    }
}
