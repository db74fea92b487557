//! Seedable random-stream handles for the Monte Carlo kernels.
//!
//! Every estimator takes a `&mut FastRng` instead of touching a process-global
//! generator. Chunked runs derive one independent substream per chunk with
//! [`stream_seed`], so each task owns its generator outright.
//!
//! References: Blackman and Vigna (2021) for xoshiro256++; Steele, Lea and
//! Flood (2014) for SplitMix64 seeding; O'Neill (2014) for PCG64 (XSL-RR 128/64).

use rand::rngs::{StdRng, ThreadRng};
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::math::normal::inverse_normal_cdf;

/// Generator family behind a [`FastRng`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FastRngKind {
    #[default]
    Xoshiro256PlusPlus,
    Pcg64,
    StdRng,
    /// OS-seeded thread-local generator; never reproducible.
    ThreadRng,
}

impl FastRngKind {
    pub fn is_reproducible(self) -> bool {
        !matches!(self, Self::ThreadRng)
    }
}

impl std::str::FromStr for FastRngKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xoshiro" | "xoshiro256" | "xoshiro256plusplus" => Ok(Self::Xoshiro256PlusPlus),
            "pcg" | "pcg64" => Ok(Self::Pcg64),
            "std" | "stdrng" => Ok(Self::StdRng),
            "thread" | "threadrng" => Ok(Self::ThreadRng),
            other => Err(PricingError::InvalidParameter(format!(
                "unknown rng kind `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Xoshiro256PlusPlus {
    state: [u64; 4],
}

impl Xoshiro256PlusPlus {
    #[inline]
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        let mut state = [0_u64; 4];
        for item in &mut state {
            *item = sm.next_u64();
        }

        if state.iter().all(|&x| x == 0) {
            state[0] = 1;
        }

        Self { state }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[0].wrapping_add(self.state[3]))
            .rotate_left(23)
            .wrapping_add(self.state[0]);

        let t = self.state[1] << 17;

        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];

        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);

        result
    }

    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(self.next_u64())
    }
}

#[derive(Debug, Clone)]
pub struct Pcg64 {
    state: u128,
    inc: u128,
}

impl Pcg64 {
    const MULTIPLIER: u128 = 47026247687942121848144207491837523525;

    #[inline]
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        let state_hi = sm.next_u64() as u128;
        let state_lo = sm.next_u64() as u128;
        let stream = sm.next_u64() as u128;

        let mut rng = Self {
            state: (state_hi << 64) | state_lo,
            inc: (stream << 1) | 1,
        };
        let _ = rng.next_u64();
        rng
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let old = self.state;
        self.state = old.wrapping_mul(Self::MULTIPLIER).wrapping_add(self.inc);

        // XSL-RR 128/64 output permutation.
        let xorshifted = ((old >> 64) ^ old) as u64;
        let rot = (old >> 122) as u32;
        xorshifted.rotate_right(rot)
    }

    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(self.next_u64())
    }
}

/// Caller-owned random stream.
#[derive(Debug)]
pub enum FastRng {
    Xoshiro256PlusPlus(Xoshiro256PlusPlus),
    Pcg64(Pcg64),
    StdRng(StdRng),
    ThreadRng(ThreadRng),
}

impl FastRng {
    #[inline]
    pub fn from_seed(kind: FastRngKind, seed: u64) -> Self {
        match kind {
            FastRngKind::Xoshiro256PlusPlus => {
                Self::Xoshiro256PlusPlus(Xoshiro256PlusPlus::seed_from_u64(seed))
            }
            FastRngKind::Pcg64 => Self::Pcg64(Pcg64::seed_from_u64(seed)),
            FastRngKind::StdRng => Self::StdRng(StdRng::seed_from_u64(seed)),
            FastRngKind::ThreadRng => Self::ThreadRng(rand::rng()),
        }
    }

    /// Default reproducible stream (Xoshiro256++).
    pub fn seeded(seed: u64) -> Self {
        Self::from_seed(FastRngKind::Xoshiro256PlusPlus, seed)
    }

    #[inline]
    pub fn random_f64(&mut self) -> f64 {
        match self {
            Self::Xoshiro256PlusPlus(rng) => rng.next_f64(),
            Self::Pcg64(rng) => rng.next_f64(),
            Self::StdRng(rng) => rng.random::<f64>(),
            Self::ThreadRng(rng) => rng.random::<f64>(),
        }
    }

    #[inline]
    pub fn random_u64(&mut self) -> u64 {
        match self {
            Self::Xoshiro256PlusPlus(rng) => rng.next_u64(),
            Self::Pcg64(rng) => rng.next_u64(),
            Self::StdRng(rng) => rng.random::<u64>(),
            Self::ThreadRng(rng) => rng.random::<u64>(),
        }
    }

    /// One standard-normal draw.
    #[inline(always)]
    pub fn standard_normal(&mut self) -> f64 {
        sample_standard_normal(self)
    }

    /// Overwrites `out` with independent standard-normal draws, in order.
    #[inline]
    pub fn fill_standard_normal(&mut self, out: &mut [f64]) {
        for z in out {
            *z = sample_standard_normal(self);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[inline]
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

#[inline]
fn unit_f64(bits: u64) -> f64 {
    (bits >> 11) as f64 * (1.0 / ((1_u64 << 53) as f64))
}

/// Seed of substream `stream_index` under `base_seed`.
///
/// Substream seeds are further scrambled by SplitMix64 inside each generator,
/// so neighbouring indices give unrelated sequences.
#[inline]
pub fn stream_seed(base_seed: u64, stream_index: usize) -> u64 {
    base_seed.wrapping_add((stream_index as u64).wrapping_mul(7_919))
}

#[inline]
pub fn resolve_stream_seed(base_seed: u64, stream_index: usize, reproducible: bool) -> u64 {
    if reproducible {
        stream_seed(base_seed, stream_index)
    } else {
        rand::rng().random::<u64>()
    }
}

/// Maps [0, 1) into (ε, 1−ε) so the inverse CDF stays finite.
#[inline(always)]
pub fn uniform_open01(u: f64) -> f64 {
    u.max(f64::EPSILON).min(1.0 - f64::EPSILON)
}

#[inline(always)]
pub fn sample_standard_normal(rng: &mut FastRng) -> f64 {
    inverse_normal_cdf(uniform_open01(rng.random_f64()))
}
