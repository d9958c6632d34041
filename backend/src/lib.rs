//! Race Simulator Core - Rust Engine
//!
//! Monte Carlo motorsport race simulator with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Lap counting
//! - **models**: Domain types (profiles, per-trial state, events, results)
//! - **incidents**: Data-driven incident events and their application
//! - **scoring**: Outcome selector (winner scoring and draw)
//! - **archetype**: Track archetype configuration and presets
//! - **roster**: Built-in competitor fields
//! - **orchestrator**: Single-trial lap loop
//! - **aggregate**: Batch runner and summary statistics
//! - **rng**: Deterministic random number generation and weighted sampling
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, one stream per trial)
//! 2. Profiles are immutable; each trial owns its mutable state
//! 3. No incident leaves fewer than the configured minimum of survivors

// Module declarations
pub mod aggregate;
pub mod archetype;
pub mod core;
pub mod incidents;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod roster;
pub mod scoring;

// Re-exports for convenience
pub use aggregate::{MonteCarloRunner, RunManifest, Summary};
pub use archetype::{ArchetypeConfig, ConfigError, TrackArchetype};
pub use core::laps::LapCounter;
pub use models::{
    competitor::{CompetitorState, PitStrategy},
    event::{EventLog, RaceEvent},
    profile::{Attribute, CompetitorProfile, ProfileError, SkillTier},
    result::TrialResult,
    state::RaceState,
};
pub use orchestrator::{compute_config_hash, SimulationEngine, SimulationError};
pub use rng::RngManager;
