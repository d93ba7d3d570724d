//! Seedable randomness for the simulation
//!
//! Everything random in a run (spawn positions, enemy types, particle spread,
//! star placement) is drawn from one uniform integer source. Floats are
//! quantised from an integer draw so a seed fully reproduces a run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Resolution of `SimRng::float`
const FLOAT_STEPS: i32 = 10_000;

#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    inner: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the thread-local entropy source (non-reproducible run)
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[min, max]`
    pub fn int_inclusive(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        self.inner.random_range(min..=max)
    }

    /// Uniform float in `[min, max]`, quantised to 1/10000 of the span
    pub fn float(&mut self, min: f32, max: f32) -> f32 {
        let step = self.int_inclusive(0, FLOAT_STEPS) as f32 / FLOAT_STEPS as f32;
        min + step * (max - min)
    }

    /// Uniform angle in `[0, 2π]`
    pub fn angle(&mut self) -> f32 {
        self.float(0.0, std::f32::consts::TAU)
    }
}
