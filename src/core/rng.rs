//! Session random number generation.
//!
//! ## Key Features
//!
//! - **Fair**: Production sessions seed ChaCha8 from the OS CSPRNG, so seat
//!   order reveals nothing about the dealt roles
//! - **Deterministic**: Tests inject a `u64` seed and get identical deals and
//!   tie-breaks on every run
//! - **Degrades loudly**: If the OS source is unavailable, a clock-derived
//!   seed is used and a warning is logged
//!
//! ```
//! use saboteur_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut deal_a = vec![1, 2, 3, 4, 5];
//! let mut deal_b = deal_a.clone();
//! a.shuffle(&mut deal_a);
//! b.shuffle(&mut deal_b);
//! assert_eq!(deal_a, deal_b);
//! ```

use log::warn;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Where the session's randomness came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RngSource {
    /// Injected seed (tests, replays).
    Seeded(u64),
    /// Operating system CSPRNG.
    OsEntropy,
    /// Clock-derived seed; only used when the OS source failed.
    ClockFallback,
}

/// Session RNG used for dealing roles and breaking vote ties.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    source: RngSource,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            source: RngSource::Seeded(seed),
        }
    }

    /// Create an RNG seeded from the operating system.
    ///
    /// Falls back to a clock-derived seed when the OS source fails.
    #[must_use]
    pub fn from_entropy() -> Self {
        let mut seed = [0u8; 32];
        match OsRng.try_fill_bytes(&mut seed) {
            Ok(()) => Self {
                inner: ChaCha8Rng::from_seed(seed),
                source: RngSource::OsEntropy,
            },
            Err(err) => {
                warn!("OS entropy unavailable ({err}); seeding from the clock");
                Self {
                    inner: ChaCha8Rng::seed_from_u64(clock_seed()),
                    source: RngSource::ClockFallback,
                }
            }
        }
    }

    /// Where this RNG was seeded from.
    #[must_use]
    pub fn source(&self) -> RngSource {
        self.source
    }

    /// Shuffle a slice in place (uniform Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}

fn clock_seed() -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::time::{SystemTime, UNIX_EPOCH};

    let mut hasher = DefaultHasher::new();
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .hash(&mut hasher);
    std::process::id().hash(&mut hasher);
    hasher.finish()
}
