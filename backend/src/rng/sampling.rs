//! Weighted random sampling
//!
//! Every incident event and the winner selector draw competitors through the
//! functions in this module. Weights are indexed by position; callers map the
//! returned indices back to their own items.
//!
//! # Invariants
//!
//! - Every weight is floored at [`WEIGHT_FLOOR`] before normalization, so a
//!   zero or negative attribute-derived weight still yields a valid
//!   distribution.
//! - Normalizing an empty weight vector, or one whose total is not finite,
//!   is a programming error and panics.

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Smallest weight any item may carry
pub const WEIGHT_FLOOR: f64 = 1e-6;

/// Whether an item may be drawn more than once in a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Replacement {
    /// Independent draws; the same item can come up repeatedly
    With,
    /// Each drawn item is removed before the next draw
    Without,
}

/// Floor every weight and scale the vector to sum to 1.0
///
/// # Panics
/// Panics if `weights` is empty or the floored total is not finite.
///
/// # Example
/// ```
/// use race_sim_core::rng::sampling::normalize;
///
/// let p = normalize(&[6.0, 3.0, 1.0]);
/// assert!((p[0] - 0.6).abs() < 1e-12);
/// ```
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    assert!(!weights.is_empty(), "cannot normalize an empty weight vector");

    let floored: Vec<f64> = weights.iter().map(|w| w.max(WEIGHT_FLOOR)).collect();
    let total: f64 = floored.iter().sum();
    assert!(
        total.is_finite() && total > 0.0,
        "weight total must be finite and positive, got {}",
        total
    );

    floored.into_iter().map(|w| w / total).collect()
}

/// Draw one index with probability proportional to its weight
///
/// # Panics
/// Panics if `weights` is empty.
pub fn weighted_index(weights: &[f64], rng: &mut RngManager) -> usize {
    let probabilities = normalize(weights);
    pick(&probabilities, rng)
}

/// Draw `k` indices according to `weights`
///
/// With [`Replacement::Without`], `k` is capped at `weights.len()` and the
/// result holds distinct indices in draw order; after every draw the
/// remaining weights are renormalized. With [`Replacement::With`] exactly
/// `k` independent draws are made from the same distribution.
///
/// # Example
/// ```
/// use race_sim_core::rng::sampling::{weighted_sample, Replacement};
/// use race_sim_core::RngManager;
///
/// let mut rng = RngManager::new(3);
/// let drawn = weighted_sample(&[1.0, 1.0, 1.0, 1.0], 3, Replacement::Without, &mut rng);
/// assert_eq!(drawn.len(), 3);
/// ```
pub fn weighted_sample(
    weights: &[f64],
    k: usize,
    replacement: Replacement,
    rng: &mut RngManager,
) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }

    match replacement {
        Replacement::With => {
            let probabilities = normalize(weights);
            (0..k).map(|_| pick(&probabilities, rng)).collect()
        }
        Replacement::Without => {
            let mut remaining: Vec<usize> = (0..weights.len()).collect();
            let mut drawn = Vec::with_capacity(k.min(weights.len()));

            while drawn.len() < k && !remaining.is_empty() {
                let pool: Vec<f64> = remaining.iter().map(|&i| weights[i]).collect();
                let slot = pick(&normalize(&pool), rng);
                drawn.push(remaining.remove(slot));
            }

            drawn
        }
    }
}

/// Inverse-CDF draw over an already normalized distribution
fn pick(probabilities: &[f64], rng: &mut RngManager) -> usize {
    let target = rng.next_f64();
    let mut cumulative = 0.0;

    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if target < cumulative {
            return i;
        }
    }

    // Rounding left the cumulative sum a hair under 1.0
    probabilities.len() - 1
}
