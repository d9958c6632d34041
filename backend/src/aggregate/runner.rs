//! Batch runner
//!
//! # Critical Invariants
//!
//! - **Seed streams**: trial `i` of a batch always runs on
//!   `RngManager::for_trial(seed, i)`, so a batch is reproducible from its
//!   seed alone
//! - **Schedule independence**: sequential and parallel runs of the same
//!   batch return identical results, in trial order

use crate::models::result::TrialResult;
use crate::orchestrator::{SimulationEngine, SimulationError};
use crate::rng::RngManager;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Inputs that identify a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunManifest {
    pub archetype: String,
    pub field_size: usize,
    pub trials: u64,
    pub seed: u64,

    /// SHA-256 of the roster and archetype config
    pub config_hash: String,
}

/// Runs batches of independent trials against one engine
#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    engine: SimulationEngine,
}

impl MonteCarloRunner {
    pub fn new(engine: SimulationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Run `trials` trials on the current thread
    pub fn run(&self, trials: u64, seed: u64) -> Vec<TrialResult> {
        let start = self.start(trials, seed, false);

        let results: Vec<TrialResult> = (0..trials).map(|i| self.trial(seed, i)).collect();

        self.finish(&results, start);
        results
    }

    /// Run `trials` trials on the rayon pool
    pub fn run_parallel(&self, trials: u64, seed: u64) -> Vec<TrialResult> {
        let start = self.start(trials, seed, true);

        let results: Vec<TrialResult> = (0..trials)
            .into_par_iter()
            .map(|i| self.trial(seed, i))
            .collect();

        self.finish(&results, start);
        results
    }

    /// Manifest for a batch of `trials` on `seed`
    pub fn manifest(&self, trials: u64, seed: u64) -> Result<RunManifest, SimulationError> {
        Ok(RunManifest {
            archetype: self.engine.config().name.clone(),
            field_size: self.engine.roster().len(),
            trials,
            seed,
            config_hash: self.engine.config_hash()?,
        })
    }

    fn trial(&self, seed: u64, index: u64) -> TrialResult {
        let mut rng = RngManager::for_trial(seed, index);
        self.engine.run_trial(index, &mut rng)
    }

    fn start(&self, trials: u64, seed: u64, parallel: bool) -> Instant {
        info!(
            archetype = %self.engine.config().name,
            trials,
            seed,
            parallel,
            threads = if parallel { rayon::current_num_threads() } else { 1 },
            "monte carlo batch started"
        );
        Instant::now()
    }

    fn finish(&self, results: &[TrialResult], start: Instant) {
        let elapsed = start.elapsed();
        info!(
            trials = results.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "monte carlo batch finished"
        );
    }
}
