//! Seeded random source for spawning

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::ops::Range;

/// Injectable PRNG; one per harness
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: Pcg32,
}

impl RandomSource {
    /// Deterministic source for tests and replays
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Source seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Seed this source was created with (log it to reproduce a run)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `[range.start, range.end)`
    #[inline]
    pub fn range_f32(&mut self, range: Range<f32>) -> f32 {
        self.rng.random_range(range)
    }

    /// Uniform in `[range.start, range.end)`
    #[inline]
    pub fn range_usize(&mut self, range: Range<usize>) -> usize {
        self.rng.random_range(range)
    }
}
