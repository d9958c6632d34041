//! Trial result record
//!
//! One immutable record per completed trial. Aggregation and export read
//! these; nothing in a result borrows from the engine.

use crate::models::competitor::PitStrategy;
use crate::models::profile::SkillTier;
use serde::{Deserialize, Serialize};

/// Outcome of one simulated race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Position of the trial in its batch
    pub trial: u64,

    pub winner: String,
    pub winner_number: u32,
    pub winner_team: String,
    pub manufacturer: String,
    pub tier: SkillTier,

    /// Winner's pit strategy (archetypes that assign one)
    pub winner_strategy: Option<PitStrategy>,

    /// Damage the winner carried to the finish
    pub winner_incidents: u32,

    /// Laps the winner led (zero unless lap leaders are tracked)
    pub winner_laps_led: usize,

    /// Competitor who led the most laps (only when lap leaders are tracked)
    pub most_laps_led: Option<String>,

    /// Scenario flag: an early-incident event fired
    pub early_incident: bool,
    pub early_incident_lap: Option<usize>,

    /// Scenario flag: the race went to overtime
    pub overtime: bool,

    pub total_cautions: usize,
    pub laps_completed: usize,
    pub field_size: usize,
    pub running_at_finish: usize,

    /// (field_size - running_at_finish) / field_size
    pub attrition_rate: f64,

    /// The field was empty and the winner was drawn from the whole roster
    pub fallback_winner: bool,
}

impl TrialResult {
    /// Competitors out of the race at the finish
    pub fn retirements(&self) -> usize {
        self.field_size - self.running_at_finish
    }

    /// No early-incident event fired
    pub fn is_clean_start(&self) -> bool {
        !self.early_incident
    }
}
