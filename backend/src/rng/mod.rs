//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.

pub mod sampling;
mod xorshift;

pub use sampling::{normalize, weighted_index, weighted_sample, Replacement, WEIGHT_FLOOR};
pub use xorshift::RngManager;
