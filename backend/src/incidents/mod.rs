//! Incident model configuration.
//!
//! An incident event is a data-driven rule evaluated once per lap. Every
//! event combines:
//!
//! 1. **Trigger**: a lap window, a per-lap probability (optionally overridden
//!    for specific laps) and an optional at-most-once latch
//! 2. **Victim count**: a uniform integer range, capped so that at least the
//!    archetype's minimum number of survivors stays running
//! 3. **Weighting**: a per-competitor weight derived from skill attributes
//! 4. **Sampling policy**: with or without replacement
//! 5. **Severity**: probability that a victim is retired rather than damaged
//!
//! Every firing brings out a caution on that lap.
//!
//! # Example
//!
//! ```
//! use race_sim_core::incidents::{IncidentEventConfig, LapWindow, VictimCount, VictimWeighting};
//! use race_sim_core::rng::Replacement;
//! use race_sim_core::Attribute;
//!
//! let event = IncidentEventConfig {
//!     name: "racing_incident".to_string(),
//!     laps: LapWindow::from_lap(6),
//!     probability: 0.02,
//!     lap_probabilities: Default::default(),
//!     once_per_race: false,
//!     victims: VictimCount { min: 1, max: 2 },
//!     weighting: VictimWeighting::Proportional {
//!         attribute: Attribute::Aggression,
//!         divisor: 30.0,
//!     },
//!     replacement: Replacement::With,
//!     retire_probability: 0.5,
//!     marks_early_incident: false,
//! };
//!
//! assert!(event.validate().is_ok());
//! assert_eq!(event.probability_at(10), 0.02);
//! ```

mod model;

pub use model::{apply_event, victim_cap, IncidentReport};

use crate::archetype::ConfigError;
use crate::models::profile::{Attribute, CompetitorProfile};
use crate::rng::Replacement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive lap range; `last = None` runs to the flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapWindow {
    pub first: usize,
    pub last: Option<usize>,
}

impl LapWindow {
    /// Exactly one lap
    pub fn only(lap: usize) -> Self {
        Self {
            first: lap,
            last: Some(lap),
        }
    }

    /// `first..=last`
    pub fn between(first: usize, last: usize) -> Self {
        Self {
            first,
            last: Some(last),
        }
    }

    /// `first..` to the end of the race, overtime included
    pub fn from_lap(first: usize) -> Self {
        Self { first, last: None }
    }

    pub fn contains(&self, lap: usize) -> bool {
        lap >= self.first && self.last.map_or(true, |last| lap <= last)
    }
}

/// Uniform victim count range, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictimCount {
    pub min: usize,
    pub max: usize,
}

/// How likely each running competitor is to be drawn into an incident
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VictimWeighting {
    /// `1 / (survival + 1) * (scale / 10 + 0.5)`
    ///
    /// Pack-racing pile-ups: poor survivors and aggressive drivers are
    /// collected first.
    InverseSurvival { survival: Attribute, scale: Attribute },

    /// `attribute / divisor`
    Proportional { attribute: Attribute, divisor: f64 },

    /// `max(floor, risk / risk_divisor - mitigation / mitigation_divisor)`
    Net {
        risk: Attribute,
        risk_divisor: f64,
        mitigation: Attribute,
        mitigation_divisor: f64,
        floor: f64,
    },
}

impl VictimWeighting {
    /// Raw (unnormalized, unfloored) weight for one competitor
    pub fn weight(&self, profile: &CompetitorProfile) -> f64 {
        match *self {
            VictimWeighting::InverseSurvival { survival, scale } => {
                1.0 / (profile.rating(survival) + 1.0) * (profile.rating(scale) / 10.0 + 0.5)
            }
            VictimWeighting::Proportional { attribute, divisor } => {
                profile.rating(attribute) / divisor
            }
            VictimWeighting::Net {
                risk,
                risk_divisor,
                mitigation,
                mitigation_divisor,
                floor,
            } => {
                let net = profile.rating(risk) / risk_divisor
                    - profile.rating(mitigation) / mitigation_divisor;
                net.max(floor)
            }
        }
    }

    /// Attributes the weighting reads
    pub fn attributes(&self) -> Vec<Attribute> {
        match *self {
            VictimWeighting::InverseSurvival { survival, scale } => vec![survival, scale],
            VictimWeighting::Proportional { attribute, .. } => vec![attribute],
            VictimWeighting::Net {
                risk, mitigation, ..
            } => vec![risk, mitigation],
        }
    }

    fn validate(&self, event: &str) -> Result<(), ConfigError> {
        match *self {
            VictimWeighting::InverseSurvival { .. } => Ok(()),
            VictimWeighting::Proportional { divisor, .. } => check_divisor(event, divisor),
            VictimWeighting::Net {
                risk_divisor,
                mitigation_divisor,
                floor,
                ..
            } => {
                check_divisor(event, risk_divisor)?;
                check_divisor(event, mitigation_divisor)?;
                if floor.is_finite() && floor > 0.0 {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidWeighting {
                        event: event.to_string(),
                        reason: format!("floor must be positive, got {}", floor),
                    })
                }
            }
        }
    }
}

fn check_divisor(event: &str, divisor: f64) -> Result<(), ConfigError> {
    if divisor.is_finite() && divisor > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeighting {
            event: event.to_string(),
            reason: format!("divisor must be positive, got {}", divisor),
        })
    }
}

/// One incident event rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentEventConfig {
    /// Identifier used in logs and event records
    pub name: String,

    /// Laps on which the event may fire
    pub laps: LapWindow,

    /// Per-lap firing probability
    pub probability: f64,

    /// Per-lap overrides of `probability` (e.g. an elevated second lap)
    #[serde(default)]
    pub lap_probabilities: BTreeMap<usize, f64>,

    /// Fire at most once per trial
    #[serde(default)]
    pub once_per_race: bool,

    pub victims: VictimCount,
    pub weighting: VictimWeighting,
    pub replacement: Replacement,

    /// Probability each victim is retired; otherwise damaged
    pub retire_probability: f64,

    /// Firing sets the trial's early-incident scenario flag
    #[serde(default)]
    pub marks_early_incident: bool,
}

impl IncidentEventConfig {
    /// Firing probability on `lap` (ignores the lap window)
    pub fn probability_at(&self, lap: usize) -> f64 {
        self.lap_probabilities
            .get(&lap)
            .copied()
            .unwrap_or(self.probability)
    }

    /// Every attribute this event reads
    pub fn attributes(&self) -> Vec<Attribute> {
        self.weighting.attributes()
    }

    /// Check probabilities, ranges and weighting parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability(&self.name, "probability", self.probability)?;
        for (lap, p) in &self.lap_probabilities {
            check_probability(&self.name, &format!("probability on lap {}", lap), *p)?;
        }
        check_probability(&self.name, "retire_probability", self.retire_probability)?;

        if self.laps.first == 0 {
            return Err(ConfigError::InvalidLapWindow {
                event: self.name.clone(),
                reason: "laps are numbered from 1".to_string(),
            });
        }
        if let Some(last) = self.laps.last {
            if last < self.laps.first {
                return Err(ConfigError::InvalidLapWindow {
                    event: self.name.clone(),
                    reason: format!("last lap {} before first lap {}", last, self.laps.first),
                });
            }
        }

        if self.victims.min > self.victims.max {
            return Err(ConfigError::InvalidVictimCount {
                event: self.name.clone(),
                min: self.victims.min,
                max: self.victims.max,
            });
        }

        self.weighting.validate(&self.name)
    }
}

pub(crate) fn check_probability(owner: &str, field: &str, p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability {
            owner: owner.to_string(),
            field: field.to_string(),
            value: p,
        })
    }
}
