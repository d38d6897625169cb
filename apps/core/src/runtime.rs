//! Injectable time and randomness collaborators.
//!
//! The response pipeline never reaches for ambient globals: the engine and
//! the context enhancer receive a [`Clock`] and a [`RandomSource`] so that
//! time-of-day buckets and probabilistic decoration are reproducible under
//! test with fixed values.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of uniform randomness.
///
/// Object-safe so the engine can hold it behind a trait object; uniform
/// slice choice is provided by [`pick`] on top of `index`.
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`.
    fn ratio(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

/// Randomness backed by the thread-local generator.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn ratio(&mut self) -> f64 {
        rand::thread_rng().gen()
    }

    fn index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Picks a uniformly random element of `items`, or `None` when empty.
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.index(items.len())])
    }
}
