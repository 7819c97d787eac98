//! Random number generation port.
//!
//! Dice and coins never call `rand` directly. They draw uniform reals from a
//! [`RandomPort`], which keeps tests deterministic without a seeding contract.
//!
//! # Implementations
//!
//! - [`ThreadRandom`] (production, uses `rand::thread_rng()`)
//! - `MockRandomPort` via mockall (testing)
//! - [`FixedRandomPort`] for deterministic testing (returns fixed values)

use std::sync::Arc;

use rand::Rng;

/// Source of uniformly distributed reals.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Generate a random f64 in range [0.0, 1.0)
    fn random_f64(&self) -> f64;
}

impl<T: RandomPort + ?Sized> RandomPort for Arc<T> {
    fn random_f64(&self) -> f64 {
        (**self).random_f64()
    }
}

impl<T: RandomPort + ?Sized> RandomPort for &T {
    fn random_f64(&self) -> f64 {
        (**self).random_f64()
    }
}

/// Production random number generator using thread-local RNG.
///
/// Not cryptographically secure and not reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl ThreadRandom {
    /// Create a new ThreadRandom.
    pub fn new() -> Self {
        Self
    }
}

impl RandomPort for ThreadRandom {
    fn random_f64(&self) -> f64 {
        rand::thread_rng().gen()
    }
}

/// Draw a uniform integer in `[min, max]` (inclusive on both ends).
///
/// Scales one uniform real onto the range and floors it. Returns `min` when
/// the range is empty or a single value.
pub fn random_int_inclusive<R: RandomPort + ?Sized>(rng: &R, min: u32, max: u32) -> u32 {
    if min >= max {
        return min;
    }

    let span = f64::from(max - min) + 1.0;
    let offset = (rng.random_f64() * span).floor() as u32;
    // A source that returns exactly 1.0 would otherwise land one past max
    min.saturating_add(offset).min(max)
}

/// Fixed random port for deterministic testing.
///
/// Returns values from a provided sequence, cycling if needed.
/// Thread-safe via atomic operations.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedRandomPort {
    values: Vec<f64>,
    index: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "testing"))]
impl FixedRandomPort {
    /// Create a new FixedRandomPort with the given sequence of values.
    ///
    /// Values are clamped into [0.0, 1.0) when drawn. An empty sequence
    /// always yields 0.0.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            index: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a FixedRandomPort that always returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.index.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "testing"))]
impl RandomPort for FixedRandomPort {
    fn random_f64(&self) -> f64 {
        let idx = self
            .index
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[idx % self.values.len()];
        value.clamp(0.0, 0.999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_f64_bounds() {
        let rng = ThreadRandom::new();
        for _ in 0..1000 {
            let value = rng.random_f64();
            assert!((0.0..1.0).contains(&value), "Value {} out of range", value);
        }
    }

    #[test]
    fn test_random_int_inclusive_bounds() {
        let rng = ThreadRandom::new();
        for _ in 0..1000 {
            let value = random_int_inclusive(&rng, 1, 20);
            assert!((1..=20).contains(&value), "Value {} out of range", value);
        }
    }

    #[test]
    fn test_random_int_inclusive_scales_unit_interval() {
        assert_eq!(random_int_inclusive(&FixedRandomPort::constant(0.0), 1, 6), 1);
        assert_eq!(random_int_inclusive(&FixedRandomPort::constant(0.5), 1, 6), 4);
        assert_eq!(random_int_inclusive(&FixedRandomPort::constant(0.99), 1, 6), 6);
        assert_eq!(random_int_inclusive(&FixedRandomPort::constant(0.5), 0, 1), 1);
        assert_eq!(random_int_inclusive(&FixedRandomPort::constant(0.49), 0, 1), 0);
    }

    #[test]
    fn test_random_int_inclusive_clamps_to_max() {
        let mut rng = MockRandomPort::new();
        rng.expect_random_f64().return_const(1.0);
        assert_eq!(random_int_inclusive(&rng, 1, 6), 6);
    }

    #[test]
    fn test_random_int_inclusive_degenerate_range() {
        let mut rng = MockRandomPort::new();
        rng.expect_random_f64().never();
        assert_eq!(random_int_inclusive(&rng, 5, 5), 5);
        assert_eq!(random_int_inclusive(&rng, 7, 3), 7);
    }

    #[test]
    fn test_random_int_inclusive_covers_every_face() {
        let rng = ThreadRandom::new();
        let mut seen = [false; 6];
        for _ in 0..10_000 {
            let value = random_int_inclusive(&rng, 1, 6);
            seen[(value - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "Not every face was rolled: {:?}", seen);
    }

    #[test]
    fn test_fixed_random_port_sequence() {
        let rng = FixedRandomPort::new(vec![0.1, 0.5, 0.9]);
        assert_eq!(rng.random_f64(), 0.1);
        assert_eq!(rng.random_f64(), 0.5);
        assert_eq!(rng.random_f64(), 0.9);
        // Cycles back
        assert_eq!(rng.random_f64(), 0.1);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_fixed_random_port_clamps() {
        let rng = FixedRandomPort::new(vec![-1.0, 2.0]);
        assert_eq!(rng.random_f64(), 0.0);
        assert!(rng.random_f64() < 1.0);
    }

    #[test]
    fn test_shared_port_through_arc() {
        let rng = Arc::new(FixedRandomPort::constant(0.25));
        let shared: Arc<dyn RandomPort> = rng.clone();
        assert_eq!(random_int_inclusive(&shared, 1, 4), 2);
        assert_eq!(rng.draws(), 1);
    }
}
