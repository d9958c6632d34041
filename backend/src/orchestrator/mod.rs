//! Orchestrator - race trial loop
//!
//! See `engine.rs` for the lap loop and `fingerprint.rs` for config hashing.

pub mod engine;
pub mod fingerprint;

pub use engine::{SimulationEngine, SimulationError};
pub use fingerprint::compute_config_hash;
