//! Simulation Engine
//!
//! Runs single race trials against a validated roster and archetype config.
//!
//! # Architecture
//!
//! One trial is a lap loop over a fresh [`RaceState`]:
//!
//! ```text
//! For each lap 1..=total (total may grow once, on overtime):
//! 1. Incident events, in config order (time-gated events come first)
//! 2. Stage break caution, if scheduled on this lap
//! 3. Overtime check (once per race)
//! 4. Lap leader draw (when laps led are tracked)
//! Then:
//! 5. Outcome selector draws the winner
//! 6. Trial result is built
//! ```
//!
//! # Critical Invariants
//!
//! 1. **Determinism**: same generator state + same engine = same result
//! 2. **Read-only engine**: trials never mutate the engine, so one engine can
//!    serve any number of threads
//! 3. **Infallible trials**: every configuration check happens in
//!    [`SimulationEngine::new`]; a trial cannot fail
//!
//! # Example
//!
//! ```rust
//! use race_sim_core::archetype::{ArchetypeConfig, TrackArchetype};
//! use race_sim_core::orchestrator::SimulationEngine;
//! use race_sim_core::{roster, RngManager};
//!
//! let engine = SimulationEngine::new(
//!     roster::for_archetype(TrackArchetype::RoadCourse),
//!     ArchetypeConfig::preset(TrackArchetype::RoadCourse),
//! )
//! .unwrap();
//!
//! let mut rng = RngManager::new(12345);
//! let result = engine.run_trial(0, &mut rng);
//! assert!(result.running_at_finish >= 2);
//! assert!(engine.roster().iter().any(|p| p.name() == result.winner));
//! ```

use crate::archetype::{ArchetypeConfig, ConfigError};
use crate::core::laps::LapCounter;
use crate::incidents::apply_event;
use crate::models::event::{EventLog, RaceEvent};
use crate::models::profile::CompetitorProfile;
use crate::models::result::TrialResult;
use crate::models::state::RaceState;
use crate::rng::{weighted_index, RngManager};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Simulation errors
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Configuration or roster rejected at construction
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Validated roster and archetype config
///
/// Construction checks everything; afterwards the engine is immutable and
/// `Sync`, and trials borrow it.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    roster: Vec<CompetitorProfile>,
    config: ArchetypeConfig,
}

impl SimulationEngine {
    /// Validate a roster against an archetype config
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidConfig`] if:
    /// - the config itself is invalid
    /// - the roster is empty or repeats a name
    /// - a profile has an out-of-range skill or lacks an attribute the
    ///   config reads
    /// - `min_survivors` exceeds the field size
    pub fn new(
        roster: Vec<CompetitorProfile>,
        config: ArchetypeConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        if roster.is_empty() {
            return Err(ConfigError::EmptyRoster.into());
        }

        let required = config.required_attributes();
        let mut names = BTreeSet::new();
        for profile in &roster {
            if !names.insert(profile.name()) {
                return Err(ConfigError::DuplicateCompetitor(profile.name().to_string()).into());
            }
            profile.validate().map_err(ConfigError::from)?;
            profile.require(&required).map_err(ConfigError::from)?;
        }

        if config.min_survivors > roster.len() {
            return Err(ConfigError::SurvivorFloor {
                min_survivors: config.min_survivors,
                field_size: roster.len(),
            }
            .into());
        }

        info!(
            archetype = %config.name,
            field_size = roster.len(),
            total_laps = config.total_laps,
            events = config.incident_events.len(),
            "simulation engine initialized"
        );

        Ok(Self { roster, config })
    }

    pub fn roster(&self) -> &[CompetitorProfile] {
        &self.roster
    }

    pub fn config(&self) -> &ArchetypeConfig {
        &self.config
    }

    /// Run one race, drawing all randomness from `rng`
    ///
    /// `trial` is only recorded in the result.
    pub fn run_trial(&self, trial: u64, rng: &mut RngManager) -> TrialResult {
        let mut state = RaceState::new(&self.roster, &self.config.pit_strategy_slots, rng);
        self.race(trial, &mut state, rng)
    }

    /// Run one race on the batch stream for (`seed`, `trial`)
    ///
    /// Gives the same result as trial `trial` of a batch run with `seed`.
    pub fn run_trial_seeded(&self, seed: u64, trial: u64) -> TrialResult {
        let mut rng = RngManager::for_trial(seed, trial);
        self.run_trial(trial, &mut rng)
    }

    /// Run one race and keep its event log
    ///
    /// Consumes exactly the same randomness as [`SimulationEngine::run_trial`],
    /// so the result is identical for the same generator state.
    pub fn run_trial_with_log(&self, trial: u64, rng: &mut RngManager) -> (TrialResult, EventLog) {
        let mut state = RaceState::new(&self.roster, &self.config.pit_strategy_slots, rng)
            .with_event_log();
        let result = self.race(trial, &mut state, rng);
        let log = state.into_event_log().unwrap_or_default();
        (result, log)
    }

    /// Win probabilities at the green flag, by roster index
    ///
    /// Ignores incidents and overtime; useful as an analytical reference for
    /// empirical win shares.
    pub fn green_flag_probabilities(&self) -> Vec<(usize, f64)> {
        let mut rng = RngManager::new(1);
        let state = RaceState::new(&self.roster, &[], &mut rng);
        self.config.scoring.win_probabilities(&state)
    }

    fn race(&self, trial: u64, state: &mut RaceState<'_>, rng: &mut RngManager) -> TrialResult {
        let mut laps = LapCounter::new(self.config.total_laps);

        while let Some(lap) = laps.next_lap() {
            for (index, event) in self.config.incident_events.iter().enumerate() {
                apply_event(index, event, lap, self.config.min_survivors, state, rng);
            }

            if self.config.stage_breaks.contains(&lap) {
                state.add_caution(lap);
                state.log(RaceEvent::StageBreak { lap });
            }

            if let Some(overtime) = &self.config.overtime {
                if !state.is_overtime() && lap >= overtime.from_lap && rng.chance(overtime.probability)
                {
                    state.trigger_overtime();
                    laps.extend(overtime.extra_laps);
                    state.add_caution(lap);
                    debug!(lap, total_laps = laps.total_laps(), "overtime triggered");
                    state.log(RaceEvent::Overtime {
                        lap,
                        total_laps: laps.total_laps(),
                    });
                }
            }

            if self.config.track_laps_led {
                self.award_lap_lead(state, rng);
            }
        }

        let selection = self.config.scoring.select_winner(state, rng);

        if selection.fallback {
            let name = state.competitors()[selection.index].name();
            debug!(winner = name, "no competitors running, fallback winner drawn");
            state.log(RaceEvent::FallbackWinner {
                lap: laps.current_lap(),
                winner: name.to_string(),
            });
        }

        let winner = &state.competitors()[selection.index];
        let profile = winner.profile();

        let most_laps_led = if self.config.track_laps_led {
            most_laps_led(state)
        } else {
            None
        };

        let result = TrialResult {
            trial,
            winner: profile.name().to_string(),
            winner_number: profile.number(),
            winner_team: profile.team().to_string(),
            manufacturer: profile.manufacturer().to_string(),
            tier: profile.tier(),
            winner_strategy: winner.pit_strategy(),
            winner_incidents: winner.incidents(),
            winner_laps_led: winner.laps_led(),
            most_laps_led,
            early_incident: state.early_incident_lap().is_some(),
            early_incident_lap: state.early_incident_lap(),
            overtime: state.is_overtime(),
            total_cautions: state.caution_laps().len(),
            laps_completed: laps.current_lap(),
            field_size: state.field_size(),
            running_at_finish: state.running_count(),
            attrition_rate: state.attrition_rate(),
            fallback_winner: selection.fallback,
        };

        trace!(
            trial,
            winner = %result.winner,
            cautions = result.total_cautions,
            running = result.running_at_finish,
            overtime = result.overtime,
            "trial complete"
        );

        result
    }

    /// Draw this lap's leader among running competitors, weighted by base score
    fn award_lap_lead(&self, state: &mut RaceState<'_>, rng: &mut RngManager) {
        let running = state.running_indices();
        if running.is_empty() {
            return;
        }

        let weights: Vec<f64> = running
            .iter()
            .map(|&i| self.config.scoring.base_score(state.competitors()[i].profile()))
            .collect();
        let leader = running[weighted_index(&weights, rng)];
        state.competitor_mut(leader).lead_lap();
    }
}

/// Competitor with the most laps led; ties go to the earlier roster entry
fn most_laps_led(state: &RaceState<'_>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for competitor in state.competitors() {
        let led = competitor.laps_led();
        if led > 0 && best.map_or(true, |(_, most)| led > most) {
            best = Some((competitor.name(), led));
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::TrackArchetype;
    use crate::models::profile::{Attribute, SkillTier};
    use crate::models::ProfileError;
    use crate::roster;

    fn road_course_engine() -> SimulationEngine {
        SimulationEngine::new(
            roster::road_course_field(),
            ArchetypeConfig::preset(TrackArchetype::RoadCourse),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_roster_rejected() {
        let err = SimulationEngine::new(Vec::new(), ArchetypeConfig::oval()).unwrap_err();
        assert_eq!(err, SimulationError::InvalidConfig(ConfigError::EmptyRoster));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut field = roster::oval_field();
        field.push(field[0].clone());
        let err = SimulationEngine::new(field, ArchetypeConfig::oval()).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidConfig(ConfigError::DuplicateCompetitor(_))
        ));
    }

    #[test]
    fn test_missing_attribute_rejected() {
        // Road-course profiles lack the oval's drafting attributes
        let err =
            SimulationEngine::new(roster::road_course_field(), ArchetypeConfig::oval()).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidConfig(ConfigError::Profile(
                ProfileError::MissingAttribute { .. }
            ))
        ));
    }

    #[test]
    fn test_survivor_floor_above_field_rejected() {
        let field = vec![CompetitorProfile::new("Solo", 1, "T", "M", SkillTier::Mid)
            .with_skills(&[
                (Attribute::RoadCourseSkill, 5.0),
                (Attribute::BrakingZones, 5.0),
                (Attribute::CornerExit, 5.0),
                (Attribute::PassingAbility, 5.0),
                (Attribute::TirePreservation, 5.0),
                (Attribute::ClutchFactor, 5.0),
                (Attribute::Aggression, 5.0),
                (Attribute::Recovery, 5.0),
            ])];
        let err = SimulationEngine::new(field, ArchetypeConfig::road_course()).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidConfig(ConfigError::SurvivorFloor { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_result() {
        let engine = road_course_engine();
        let a = engine.run_trial(0, &mut RngManager::new(99));
        let b = engine.run_trial(0, &mut RngManager::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_logged_trial_matches_plain_trial() {
        let engine = road_course_engine();
        let plain = engine.run_trial(3, &mut RngManager::new(7));
        let (logged, log) = engine.run_trial_with_log(3, &mut RngManager::new(7));

        assert_eq!(plain, logged);
        // Two stage breaks always appear
        assert_eq!(log.events_of_type("StageBreak").len(), 2);
    }

    #[test]
    fn test_road_course_distance_fixed() {
        let engine = road_course_engine();
        let result = engine.run_trial_seeded(5, 0);
        assert_eq!(result.laps_completed, 68);
        assert!(!result.overtime);
        assert!(result.total_cautions >= 2);
    }

    #[test]
    fn test_green_flag_probabilities_sum_to_one() {
        let engine = road_course_engine();
        let probs = engine.green_flag_probabilities();
        assert_eq!(probs.len(), 16);
        let total: f64 = probs.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
