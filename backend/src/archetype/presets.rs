//! Built-in archetype presets

use super::{ArchetypeConfig, OvertimeConfig};
use crate::incidents::{IncidentEventConfig, LapWindow, VictimCount, VictimWeighting};
use crate::models::competitor::PitStrategy;
use crate::models::profile::{Attribute, SkillTier};
use crate::rng::Replacement;
use crate::scoring::{ScoringConfig, SkillModifier};
use std::collections::BTreeMap;

impl ArchetypeConfig {
    /// 260-lap drafting oval
    ///
    /// Pack racing makes for one big early pile-up (at most once, most
    /// likely on lap 2) and small multi-car wrecks after that. A late
    /// caution can send the race to overtime, where restarts and clutch
    /// driving decide it.
    pub fn oval() -> Self {
        Self {
            name: "oval".to_string(),
            total_laps: 260,
            min_survivors: 2,
            pit_strategy_slots: vec![
                PitStrategy::Normal,
                PitStrategy::Normal,
                PitStrategy::Normal,
                PitStrategy::Aggressive,
            ],
            incident_events: vec![
                IncidentEventConfig {
                    name: "early_carnage".to_string(),
                    laps: LapWindow::between(1, 5),
                    probability: 0.06,
                    lap_probabilities: [(2, 0.18)].into_iter().collect(),
                    once_per_race: true,
                    victims: VictimCount { min: 6, max: 12 },
                    weighting: VictimWeighting::InverseSurvival {
                        survival: Attribute::ChaosSurvival,
                        scale: Attribute::Aggression,
                    },
                    replacement: Replacement::Without,
                    retire_probability: 1.0,
                    marks_early_incident: true,
                },
                IncidentEventConfig {
                    name: "mid_race_incident".to_string(),
                    laps: LapWindow::from_lap(11),
                    probability: 0.015,
                    lap_probabilities: BTreeMap::new(),
                    once_per_race: false,
                    victims: VictimCount { min: 1, max: 3 },
                    weighting: VictimWeighting::Proportional {
                        attribute: Attribute::Aggression,
                        divisor: 50.0,
                    },
                    replacement: Replacement::With,
                    retire_probability: 1.0,
                    marks_early_incident: false,
                },
            ],
            stage_breaks: Vec::new(),
            overtime: Some(OvertimeConfig {
                from_lap: 255,
                probability: 0.25,
                extra_laps: 2,
            }),
            scoring: ScoringConfig {
                weights: [
                    (Attribute::BaseSpeed, 0.18),
                    (Attribute::TireManagement, 0.18),
                    (Attribute::DraftingIq, 0.12),
                    (Attribute::RestartSkill, 0.18),
                    (Attribute::ClutchFactor, 0.22),
                    (Attribute::RecentForm, 0.12),
                ]
                .into_iter()
                .collect(),
                damage_penalty: 0.0,
                overtime_modifiers: vec![
                    SkillModifier {
                        attribute: Attribute::RestartSkill,
                        divisor: 8.0,
                        offset: 0.5,
                    },
                    SkillModifier {
                        attribute: Attribute::ClutchFactor,
                        divisor: 8.0,
                        offset: 0.5,
                    },
                ],
                tier_bonuses: BTreeMap::new(),
                manufacturer_bonuses: [
                    ("Chevrolet".to_string(), 1.10),
                    ("Toyota".to_string(), 1.05),
                ]
                .into_iter()
                .collect(),
                elite_teams: vec![
                    "Hendrick".to_string(),
                    "Joe Gibbs".to_string(),
                    "Penske".to_string(),
                ],
                elite_team_bonus: 1.15,
                score_floor: 0.1,
            },
            track_laps_led: false,
        }
    }

    /// 68-lap, 20-turn road course
    ///
    /// Turn 1 on the opening lap is the big risk; after that, contact and
    /// spins are small and often leave a damaged car running. Two stage
    /// breaks add scripted cautions.
    pub fn road_course() -> Self {
        Self {
            name: "road_course".to_string(),
            total_laps: 68,
            min_survivors: 2,
            pit_strategy_slots: Vec::new(),
            incident_events: vec![
                IncidentEventConfig {
                    name: "turn_one_lap_one".to_string(),
                    laps: LapWindow::only(1),
                    probability: 0.35,
                    lap_probabilities: BTreeMap::new(),
                    once_per_race: true,
                    victims: VictimCount { min: 2, max: 5 },
                    weighting: VictimWeighting::Proportional {
                        attribute: Attribute::Aggression,
                        divisor: 30.0,
                    },
                    replacement: Replacement::With,
                    retire_probability: 0.6,
                    marks_early_incident: true,
                },
                IncidentEventConfig {
                    name: "racing_incident".to_string(),
                    laps: LapWindow::from_lap(6),
                    probability: 0.02,
                    lap_probabilities: BTreeMap::new(),
                    once_per_race: false,
                    victims: VictimCount { min: 1, max: 2 },
                    weighting: VictimWeighting::Net {
                        risk: Attribute::Aggression,
                        risk_divisor: 20.0,
                        mitigation: Attribute::Recovery,
                        mitigation_divisor: 30.0,
                        floor: 0.01,
                    },
                    replacement: Replacement::With,
                    retire_probability: 0.5,
                    marks_early_incident: false,
                },
            ],
            stage_breaks: vec![15, 30],
            overtime: None,
            scoring: ScoringConfig {
                weights: [
                    (Attribute::RoadCourseSkill, 0.30),
                    (Attribute::BrakingZones, 0.15),
                    (Attribute::CornerExit, 0.15),
                    (Attribute::PassingAbility, 0.10),
                    (Attribute::TirePreservation, 0.10),
                    (Attribute::ClutchFactor, 0.10),
                    (Attribute::RecentForm, 0.10),
                ]
                .into_iter()
                .collect(),
                damage_penalty: 0.15,
                overtime_modifiers: Vec::new(),
                tier_bonuses: [(SkillTier::Specialist, 1.30)].into_iter().collect(),
                manufacturer_bonuses: BTreeMap::new(),
                elite_teams: vec![
                    "Hendrick".to_string(),
                    "Joe Gibbs".to_string(),
                    "Trackhouse".to_string(),
                ],
                elite_team_bonus: 1.10,
                score_floor: 0.1,
            },
            track_laps_led: false,
        }
    }
}
