//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for Monte Carlo race simulation.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. A batch of trials run with
//! the same base seed produces identical win counts, whether the trials run
//! on one thread or many.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// Each trial owns its own instance; instances are never shared across
/// threads.
///
/// # Example
/// ```
/// use race_sim_core::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let victims = rng.range_inclusive(6, 12);
/// assert!((6..=12).contains(&victims));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// # Example
    /// ```
    /// use race_sim_core::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// assert_eq!(rng.get_state(), 12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create the generator for one trial of a batch
    ///
    /// The batch seed and trial index are mixed with splitmix64 so that
    /// neighbouring trials start from uncorrelated states. The stream for
    /// trial `i` depends only on `(seed, i)`, never on which worker runs it.
    ///
    /// # Example
    /// ```
    /// use race_sim_core::RngManager;
    ///
    /// let mut a = RngManager::for_trial(42, 7);
    /// let mut b = RngManager::for_trial(42, 7);
    /// assert_eq!(a.next(), b.next());
    /// ```
    pub fn for_trial(seed: u64, trial_index: u64) -> Self {
        let mut z = seed ^ trial_index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::new(z ^ (z >> 31))
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use race_sim_core::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let slot = rng.range(0, 20);
    /// assert!((0..20).contains(&slot));
    /// ```
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Generate random value in range [min, max] (both inclusive)
    ///
    /// # Panics
    /// Panics if min > max
    pub fn range_inclusive(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "min must not exceed max");
        self.range(min as i64, max as i64 + 1) as usize
    }

    /// Pick a uniformly random index in [0, len)
    ///
    /// # Panics
    /// Panics if len == 0
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index from an empty collection");
        self.range(0, len as i64) as usize
    }

    /// Get current RNG state (for replaying a single trial)
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use race_sim_core::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let probability = rng.next_f64();
    /// assert!(probability >= 0.0 && probability < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) by dividing by 2^53
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Bernoulli draw: true with probability `p`
    ///
    /// Always consumes exactly one value from the stream, so the sequence of
    /// later draws does not depend on `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.range(100, 50);
    }

    #[test]
    #[should_panic(expected = "empty collection")]
    fn test_index_of_empty_panics() {
        let mut rng = RngManager::new(12345);
        rng.index(0);
    }

    #[test]
    fn test_range_inclusive_hits_both_ends() {
        let mut rng = RngManager::new(7);
        let mut seen_min = false;
        let mut seen_max = false;

        for _ in 0..2000 {
            let v = rng.range_inclusive(2, 5);
            assert!((2..=5).contains(&v));
            seen_min |= v == 2;
            seen_max |= v == 5;
        }

        assert!(seen_min && seen_max, "inclusive range must reach both bounds");
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = RngManager::new(99);
        for _ in 0..500 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_for_trial_streams_differ() {
        let mut a = RngManager::for_trial(42, 0);
        let mut b = RngManager::for_trial(42, 1);
        assert_ne!(a.next(), b.next());
    }
}
