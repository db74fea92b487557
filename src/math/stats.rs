//! Mergeable sample statistics for payoff accumulation.
//!
//! Payoffs are never stored per path: each chunk folds them into a
//! [`SampleStats`] (Welford update) and chunks are combined with
//! [`SampleStats::merge`] (Chan et al. pairwise update). Merging in a fixed
//! chunk order keeps parallel and sequential runs bit-identical.
//!
//! The second central moment is held relative to `scale`, the largest
//! magnitude observed so far, so squared deviations stay finite for any
//! finite sample.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    count: u64,
    mean: f64,
    /// Sum of squared deviations divided by `scale^2`.
    m2: f64,
    scale: f64,
}

#[inline]
fn rescale(m2: f64, from: f64, to: f64) -> f64 {
    if from == to || to == 0.0 {
        m2
    } else {
        let r = from / to;
        m2 * r * r
    }
}

impl SampleStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let ax = x.abs();
        if ax > self.scale {
            self.m2 = rescale(self.m2, self.scale, ax);
            self.scale = ax;
        }
        if self.scale == 0.0 {
            return;
        }

        let n = self.count as f64;
        let delta = x / self.scale - self.mean / self.scale;
        self.mean += (delta / n) * self.scale;
        self.m2 += delta * (x / self.scale - self.mean / self.scale);
    }

    /// Combines two disjoint samples.
    pub fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        if other.count == 0 {
            return self;
        }

        let count = self.count + other.count;
        let scale = self.scale.max(other.scale);
        if scale == 0.0 {
            return Self {
                count,
                ..Self::default()
            };
        }

        let n = count as f64;
        let (na, nb) = (self.count as f64, other.count as f64);
        let delta = other.mean / scale - self.mean / scale;
        let mean = self.mean + (delta * nb / n) * scale;
        let m2 = rescale(self.m2, self.scale, scale)
            + rescale(other.m2, other.scale, scale)
            + delta * delta * (na * nb) / n;
        Self {
            count,
            mean,
            m2,
            scale,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance; zero below two observations.
    ///
    /// Overflows to infinity when the variance itself exceeds `f64::MAX`;
    /// [`Self::std_error`] stays finite in that case.
    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / (self.count - 1) as f64 * self.scale * self.scale
        } else {
            0.0
        }
    }

    /// Standard error of the mean.
    pub fn std_error(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        (self.m2 / ((n - 1.0) * n)).sqrt() * self.scale
    }
}

impl FromIterator<f64> for SampleStats {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut stats = Self::new();
        for x in iter {
            stats.push(x);
        }
        stats
    }
}
