//! Per-trial competitor state
//!
//! Wraps a borrowed [`CompetitorProfile`] with the fields a single trial
//! mutates. The profile itself is never touched, so any number of trials can
//! share one roster.
//!
//! # Critical Invariants
//!
//! 1. `running` only ever goes from true to false within a trial
//! 2. `incidents` and `laps_led` only increase

use crate::models::profile::CompetitorProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pit strategy assigned to a competitor for one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitStrategy {
    Normal,
    Aggressive,
}

impl PitStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PitStrategy::Normal => "normal",
            PitStrategy::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for PitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state of one competitor during one trial
#[derive(Debug, Clone)]
pub struct CompetitorState<'a> {
    profile: &'a CompetitorProfile,
    running: bool,
    laps_led: usize,
    incidents: u32,
    involved_in_incident: bool,
    pit_strategy: Option<PitStrategy>,
}

impl<'a> CompetitorState<'a> {
    /// Fresh state at the green flag
    pub fn new(profile: &'a CompetitorProfile, pit_strategy: Option<PitStrategy>) -> Self {
        Self {
            profile,
            running: true,
            laps_led: 0,
            incidents: 0,
            involved_in_incident: false,
            pit_strategy,
        }
    }

    pub fn profile(&self) -> &'a CompetitorProfile {
        self.profile
    }

    pub fn name(&self) -> &'a str {
        self.profile.name()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn laps_led(&self) -> usize {
        self.laps_led
    }

    pub fn incidents(&self) -> u32 {
        self.incidents
    }

    pub fn involved_in_incident(&self) -> bool {
        self.involved_in_incident
    }

    pub fn pit_strategy(&self) -> Option<PitStrategy> {
        self.pit_strategy
    }

    /// Take the competitor out of the race for the rest of the trial
    pub fn retire(&mut self) {
        self.running = false;
        self.involved_in_incident = true;
    }

    /// Record damage; the competitor keeps running
    pub fn damage(&mut self) {
        self.incidents += 1;
        self.involved_in_incident = true;
    }

    pub fn lead_lap(&mut self) {
        self.laps_led += 1;
    }
}
