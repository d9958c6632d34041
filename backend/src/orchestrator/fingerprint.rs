//! Configuration fingerprint
//!
//! A run is reproducible from (engine inputs, seed, trial count). The
//! fingerprint pins down the engine inputs: a SHA-256 over the canonical
//! JSON form of the roster and archetype config.
//!
//! # Critical Invariants
//!
//! - **Canonical**: object keys are sorted before hashing, so field order in
//!   a loaded JSON file never changes the hash
//! - **Sensitive**: any change to a skill, probability or weight changes it

use crate::orchestrator::engine::{SimulationEngine, SimulationError};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// SHA-256 (hex) of a value's canonical JSON form
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Recursively sort object keys
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

impl SimulationEngine {
    /// Fingerprint of this engine's roster and config
    pub fn config_hash(&self) -> Result<String, SimulationError> {
        #[derive(Serialize)]
        struct Inputs<'a> {
            roster: &'a [crate::models::CompetitorProfile],
            config: &'a crate::archetype::ArchetypeConfig,
        }

        compute_config_hash(&Inputs {
            roster: self.roster(),
            config: self.config(),
        })
    }
}
