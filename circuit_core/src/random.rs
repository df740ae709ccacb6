//! Randomness seam for workout expansion.
//!
//! The expander makes two kinds of random decisions: the exercise order of
//! each shuffled set and the rep count of every exercise instance. Both go
//! through [`RandomSource`] so tests can script exact outcomes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of the random decisions made while expanding a workout
pub trait RandomSource {
    /// Uniform integer in `min..=max`. Callers guarantee `min <= max`.
    fn reps_between(&mut self, min: u32, max: u32) -> u32;

    /// Uniform permutation of `0..len`
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

/// [`RandomSource`] backed by any `rand` generator
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible sequences
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn reps_between(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }
}
