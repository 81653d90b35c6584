//! Deterministic random number generation for battles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical shuffles and picks
//! - **Injectable**: Tests construct a session with a known seed
//! - **Context streams**: Independent sequences for different purposes
//!
//! ```
//! use stack_battle::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! let mut x = vec![1, 2, 3, 4, 5];
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backing deck shuffles and random index picks.
///
/// Uses ChaCha8 for speed while keeping a reproducible stream per seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// Keeps deck shuffling from perturbing effect randomness (and vice
    /// versa) when content changes. The same context always produces the
    /// same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random usize in `0..=max`.
    pub fn gen_index_inclusive(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..=max)
    }

    /// Classic backward Fisher–Yates shuffle.
    ///
    /// Walks from the last slot to the second, swapping each with a slot
    /// drawn uniformly from the not-yet-fixed prefix (itself included).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let mut n = slice.len();
        while n > 1 {
            n -= 1;
            let k = self.gen_index_inclusive(n);
            slice.swap(k, n);
        }
    }

    /// Draw `amount` distinct indices uniformly from `0..pool`.
    ///
    /// Returns the whole pool when `amount >= pool`. The result is sorted.
    pub fn sample_indices(&mut self, pool: usize, amount: usize) -> Vec<usize> {
        if amount >= pool {
            return (0..pool).collect();
        }
        let mut picked = rand::seq::index::sample(&mut self.inner, pool, amount).into_vec();
        picked.sort_unstable();
        picked
    }
}
