//! Numerical building blocks: random streams, normal distribution helpers,
//! and sample statistics.

pub mod fast_rng;
pub mod normal;
pub mod stats;

pub use fast_rng::{FastRng, FastRngKind, stream_seed};
pub use normal::{inverse_normal_cdf, normal_cdf, normal_pdf};
pub use stats::SampleStats;
