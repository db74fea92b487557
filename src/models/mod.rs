//! Stochastic process models driving the simulators.

use serde::{Deserialize, Serialize};

/// Geometric Brownian motion `dS = mu S dt + sigma S dW`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    /// Risk-neutral dynamics: drift equals the short rate.
    pub fn risk_neutral(rate: f64, sigma: f64) -> Self {
        Self { mu: rate, sigma }
    }

    pub fn drift(&self, s: f64) -> f64 {
        self.mu * s
    }

    pub fn diffusion(&self, s: f64) -> f64 {
        self.sigma * s
    }

    /// Exact log-normal transition over `dt`.
    #[inline]
    pub fn step_exact(&self, s: f64, dt: f64, z: f64) -> f64 {
        s * ((self.mu - 0.5 * self.sigma * self.sigma) * dt + self.sigma * z * dt.sqrt()).exp()
    }

    /// Euler–Maruyama step; `sqrt_dt` is passed in so grids compute it once.
    #[inline]
    pub fn step_euler(&self, s: f64, dt: f64, sqrt_dt: f64, z: f64) -> f64 {
        s + self.drift(s) * dt + self.diffusion(s) * z * sqrt_dt
    }
}
