//! Per-call random source.
//!
//! Each generation call owns one `RandomSource`; nothing is shared between
//! calls, so concurrent generations never interfere and a fixed seed replays
//! the exact same challenge.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seeds from the OS random source, falling back to the wall clock.
    #[must_use]
    pub fn new() -> Self {
        match StdRng::try_from_os_rng() {
            Ok(rng) => Self { rng },
            Err(e) => {
                warn!(error = %e, "OS random source unavailable, seeding from clock");
                Self::from_seed(clock_seed())
            }
        }
    }

    /// Deterministic stream for a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent child stream from this one.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            rng: StdRng::from_rng(&mut self.rng),
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn float64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform integer in `[0, n)`; zero when `n` is zero.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }

    /// Uniform non-negative `i64` (63 random bits).
    pub fn int63(&mut self) -> i64 {
        (self.rng.random::<u64>() >> 1).cast_signed()
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    nanos as u64
}
