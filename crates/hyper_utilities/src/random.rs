//! Seeded uniform random numbers.
//!
//! [`Random`] is an explicit generator value rather than process-wide state.
//! Construct it with a seed for reproducible sequences, or from OS entropy.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Uniform random number generator.
#[derive(Debug, Clone)]
pub struct Random {
    rng: ChaCha8Rng,
}

impl Random {
    /// A generator whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "seeded random generator");
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A generator seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "reseeded random generator");
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// A uniform integer in `0..=i32::MAX`.
    pub fn int(&mut self) -> i32 {
        self.rng.gen_range(0..=i32::MAX)
    }

    /// A uniform integer between `start` and `end`, both inclusive.
    ///
    /// The bounds may be given in either order.
    pub fn int_range(&mut self, start: i32, end: i32) -> i32 {
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        self.rng.gen_range(low..=high)
    }

    /// A uniform `f32` in `[0, 1]`, both ends included.
    pub fn float(&mut self) -> f32 {
        self.rng.next_u32() as f32 / u32::MAX as f32
    }

    /// `start + float() * (end - start)`.
    pub fn float_range(&mut self, start: f32, end: f32) -> f32 {
        start + self.float() * (end - start)
    }

    /// A uniform `f64` in `[0, 1]`, both ends included.
    pub fn double(&mut self) -> f64 {
        f64::from(self.rng.next_u32()) / f64::from(u32::MAX)
    }

    /// `start + double() * (end - start)`.
    pub fn double_range(&mut self, start: f64, end: f64) -> f64 {
        start + self.double() * (end - start)
    }

    /// `true` when [`float`](Self::float) lands in the upper half.
    pub fn bool(&mut self) -> bool {
        self.float() >= 0.5
    }
}
