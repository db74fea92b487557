//! Seeded, chunked Monte Carlo runner.
//!
//! Paths are split into fixed-size chunks. Chunk `k` draws from its own
//! [`FastRng`] seeded with `stream_seed(seed, k)` and folds its payoffs into a
//! [`SampleStats`]. Chunk results are merged in index order, so the estimate
//! depends only on `(seed, rng_kind, chunk_size, num_paths)`, never on how many
//! threads ran the chunks.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::math::fast_rng::resolve_stream_seed;
use crate::math::{FastRng, FastRngKind, SampleStats};

pub const DEFAULT_CHUNK_SIZE: usize = 8_192;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloEngine {
    pub num_paths: usize,
    pub seed: u64,
    pub rng_kind: FastRngKind,
    pub reproducible: bool,
    pub chunk_size: usize,
}

impl MonteCarloEngine {
    pub fn new(num_paths: usize, seed: u64) -> Self {
        Self {
            num_paths,
            seed,
            rng_kind: FastRngKind::Xoshiro256PlusPlus,
            reproducible: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_rng_kind(mut self, rng_kind: FastRngKind) -> Self {
        self.rng_kind = rng_kind;
        if !rng_kind.is_reproducible() {
            self.reproducible = false;
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.reproducible = self.rng_kind.is_reproducible();
        self
    }

    /// Seeds every chunk from OS entropy instead of the base seed.
    pub fn with_randomized_streams(mut self) -> Self {
        self.reproducible = false;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.num_paths == 0 {
            return Err(PricingError::InvalidParameter(
                "num_paths must be > 0".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(PricingError::InvalidParameter(
                "chunk_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn num_chunks(&self) -> usize {
        self.num_paths.div_ceil(self.chunk_size.max(1))
    }

    /// Path count of chunk `index`; only the last chunk may be short.
    fn chunk_len(&self, index: usize) -> usize {
        let start = index * self.chunk_size;
        self.chunk_size.min(self.num_paths - start)
    }

    /// Runs `kernel(paths_in_chunk, rng)` over every chunk and merges the
    /// resulting statistics in chunk order.
    ///
    /// The first kernel error aborts the run.
    pub fn run<K>(&self, kernel: K) -> Result<SampleStats, PricingError>
    where
        K: Fn(usize, &mut FastRng) -> Result<SampleStats, PricingError> + Send + Sync,
    {
        self.validate()?;

        let simulate_chunk = |index: usize| {
            let seed = resolve_stream_seed(self.seed, index, self.reproducible);
            let mut rng = FastRng::from_seed(self.rng_kind, seed);
            let stats = kernel(self.chunk_len(index), &mut rng)?;
            tracing::trace!(chunk = index, paths = stats.count(), "chunk finished");
            Ok(stats)
        };

        #[cfg(feature = "parallel")]
        let chunks: Vec<SampleStats> = (0..self.num_chunks())
            .into_par_iter()
            .map(simulate_chunk)
            .collect::<Result<_, PricingError>>()?;
        #[cfg(not(feature = "parallel"))]
        let chunks: Vec<SampleStats> = (0..self.num_chunks())
            .map(simulate_chunk)
            .collect::<Result<_, PricingError>>()?;

        Ok(chunks
            .into_iter()
            .fold(SampleStats::new(), SampleStats::merge))
    }
}
