//! Track archetype configuration
//!
//! One [`ArchetypeConfig`] fully describes how a race on a given kind of
//! track unfolds: distance, incident events (evaluated in list order each
//! lap), scripted stage breaks, the overtime rule, pit strategy assignment
//! and the winner scoring formula. The engine is generic over this data;
//! the oval and road-course archetypes are two presets.
//!
//! # Example
//!
//! ```
//! use race_sim_core::archetype::{ArchetypeConfig, TrackArchetype};
//!
//! let oval = ArchetypeConfig::preset(TrackArchetype::Oval);
//! assert_eq!(oval.total_laps, 260);
//! assert!(oval.validate().is_ok());
//! ```

mod presets;

use crate::incidents::{check_probability, IncidentEventConfig};
use crate::models::competitor::PitStrategy;
use crate::models::profile::{Attribute, ProfileError};
use crate::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Configuration validation errors
///
/// Raised only while constructing an engine, never during a trial.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Roster must contain at least one competitor")]
    EmptyRoster,

    #[error("Duplicate competitor name: {0}")]
    DuplicateCompetitor(String),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("total_laps must be > 0")]
    ZeroLaps,

    #[error("{owner}: {field} = {value} is not a probability in [0, 1]")]
    InvalidProbability {
        owner: String,
        field: String,
        value: f64,
    },

    #[error("{event}: invalid lap window: {reason}")]
    InvalidLapWindow { event: String, reason: String },

    #[error("{event}: victim range {min}..={max} is inverted")]
    InvalidVictimCount { event: String, min: usize, max: usize },

    #[error("{event}: invalid weighting: {reason}")]
    InvalidWeighting { event: String, reason: String },

    #[error("Duplicate incident event name: {0}")]
    DuplicateEvent(String),

    #[error("Invalid scoring: {0}")]
    InvalidScoring(String),

    #[error("Score weights sum to {total}, expected about 1.0")]
    WeightSum { total: f64 },

    #[error("min_survivors {min_survivors} exceeds field size {field_size}")]
    SurvivorFloor {
        min_survivors: usize,
        field_size: usize,
    },

    #[error("Stage break on lap {lap} is outside the {total_laps}-lap race")]
    StageBreak { lap: usize, total_laps: usize },

    #[error("Invalid overtime rule: {0}")]
    InvalidOvertime(String),
}

/// Built-in track archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackArchetype {
    /// High-speed drafting oval
    Oval,
    /// Technical road course
    RoadCourse,
}

impl fmt::Display for TrackArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackArchetype::Oval => f.write_str("oval"),
            TrackArchetype::RoadCourse => f.write_str("road_course"),
        }
    }
}

/// Late-caution overtime rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvertimeConfig {
    /// First lap on which overtime can be triggered
    pub from_lap: usize,

    /// Per-lap trigger probability
    pub probability: f64,

    /// Laps added to the distance when triggered
    pub extra_laps: usize,
}

/// Complete description of one track archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeConfig {
    /// Label used in logs and reports
    pub name: String,

    /// Scheduled race distance
    pub total_laps: usize,

    /// No incident may leave fewer than this many competitors running
    pub min_survivors: usize,

    /// Uniform slots for per-trial pit strategy (empty = none assigned)
    #[serde(default)]
    pub pit_strategy_slots: Vec<PitStrategy>,

    /// Incident events, evaluated in this order every lap
    pub incident_events: Vec<IncidentEventConfig>,

    /// Laps with a scripted caution
    #[serde(default)]
    pub stage_breaks: Vec<usize>,

    #[serde(default)]
    pub overtime: Option<OvertimeConfig>,

    pub scoring: ScoringConfig,

    /// Draw a lap leader every lap and count laps led
    #[serde(default)]
    pub track_laps_led: bool,
}

impl ArchetypeConfig {
    /// Built-in configuration for an archetype
    pub fn preset(archetype: TrackArchetype) -> Self {
        match archetype {
            TrackArchetype::Oval => Self::oval(),
            TrackArchetype::RoadCourse => Self::road_course(),
        }
    }

    /// Every attribute a profile must carry to race under this config
    pub fn required_attributes(&self) -> BTreeSet<Attribute> {
        self.incident_events
            .iter()
            .flat_map(|e| e.attributes())
            .chain(self.scoring.attributes())
            .collect()
    }

    /// Roster-independent checks
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_laps == 0 {
            return Err(ConfigError::ZeroLaps);
        }

        let mut names = BTreeSet::new();
        for event in &self.incident_events {
            if !names.insert(event.name.as_str()) {
                return Err(ConfigError::DuplicateEvent(event.name.clone()));
            }
            event.validate()?;
        }

        if let Some(&lap) = self
            .stage_breaks
            .iter()
            .find(|&&lap| lap == 0 || lap > self.total_laps)
        {
            return Err(ConfigError::StageBreak {
                lap,
                total_laps: self.total_laps,
            });
        }

        if let Some(overtime) = &self.overtime {
            check_probability("overtime", "probability", overtime.probability)?;
            if overtime.from_lap == 0 || overtime.from_lap > self.total_laps {
                return Err(ConfigError::InvalidOvertime(format!(
                    "from_lap {} outside the {}-lap race",
                    overtime.from_lap, self.total_laps
                )));
            }
        }

        self.scoring.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(ArchetypeConfig::oval().validate().is_ok());
        assert!(ArchetypeConfig::road_course().validate().is_ok());
    }

    #[test]
    fn test_required_attributes_cover_events_and_scoring() {
        let oval = ArchetypeConfig::oval();
        let required = oval.required_attributes();
        assert!(required.contains(&Attribute::ChaosSurvival));
        assert!(required.contains(&Attribute::RestartSkill));
        assert!(required.contains(&Attribute::RecentForm));
        assert!(!required.contains(&Attribute::Recovery));
    }

    #[test]
    fn test_zero_laps_rejected() {
        let mut config = ArchetypeConfig::road_course();
        config.total_laps = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLaps));
    }

    #[test]
    fn test_stage_break_outside_race_rejected() {
        let mut config = ArchetypeConfig::road_course();
        config.stage_breaks.push(100);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StageBreak { lap: 100, .. })
        ));
    }

    #[test]
    fn test_duplicate_event_rejected() {
        let mut config = ArchetypeConfig::road_course();
        let dup = config.incident_events[0].clone();
        config.incident_events.push(dup);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateEvent(_))));
    }

    #[test]
    fn test_overtime_probability_checked() {
        let mut config = ArchetypeConfig::oval();
        if let Some(overtime) = config.overtime.as_mut() {
            overtime.probability = 2.0;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_config_parses_with_defaults() {
        let json = r#"{
            "name": "short_track",
            "total_laps": 50,
            "min_survivors": 1,
            "incident_events": [],
            "scoring": {
                "weights": { "base_speed": 0.5, "recent_form": 0.5 },
                "score_floor": 0.1
            }
        }"#;

        let config: ArchetypeConfig = serde_json::from_str(json).unwrap();

        assert!(config.pit_strategy_slots.is_empty());
        assert!(config.overtime.is_none());
        assert!(!config.track_laps_led);
        assert_eq!(config.scoring.elite_team_bonus, 1.0);
        assert!(config.validate().is_ok());
    }
}
