//! Outcome selector
//!
//! Turns the race-end state into a win-probability distribution and draws a
//! winner.
//!
//! # Score model
//!
//! For each running competitor:
//!
//! ```text
//! score = Σ weight[a] × skill[a]                    (base, recent form included)
//! score ×= 1 − incidents × damage_penalty           (if damage_penalty > 0)
//! score ×= skill[m] / divisor + offset              (each overtime modifier, overtime only)
//! score ×= tier_bonus[tier]
//! score ×= manufacturer_bonus[manufacturer]
//! score ×= elite_team_bonus                         (if team is elite)
//! score  = max(score, score_floor)
//! ```
//!
//! Scores are normalized over the running field and one winner is drawn.
//! With nobody running, the winner is drawn uniformly from the whole roster.

use crate::archetype::ConfigError;
use crate::incidents::check_probability;
use crate::models::competitor::CompetitorState;
use crate::models::profile::{Attribute, CompetitorProfile, SkillTier};
use crate::models::state::RaceState;
use crate::rng::{normalize, weighted_index, RngManager};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowed distance of the base weight total from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.05;

/// Multiplier of the form `skill / divisor + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillModifier {
    pub attribute: Attribute,
    pub divisor: f64,
    pub offset: f64,
}

impl SkillModifier {
    pub fn factor(&self, profile: &CompetitorProfile) -> f64 {
        profile.rating(self.attribute) / self.divisor + self.offset
    }
}

/// Archetype-specific winner scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Base linear weights; should sum to about 1.0
    pub weights: BTreeMap<Attribute, f64>,

    /// Fractional score lost per incident carried (0 disables)
    #[serde(default)]
    pub damage_penalty: f64,

    /// Applied in order when the race went to overtime
    #[serde(default)]
    pub overtime_modifiers: Vec<SkillModifier>,

    #[serde(default)]
    pub tier_bonuses: BTreeMap<SkillTier, f64>,

    #[serde(default)]
    pub manufacturer_bonuses: BTreeMap<String, f64>,

    #[serde(default)]
    pub elite_teams: Vec<String>,

    #[serde(default = "no_bonus")]
    pub elite_team_bonus: f64,

    /// Lowest score any running competitor can have
    pub score_floor: f64,
}

fn no_bonus() -> f64 {
    1.0
}

/// Winner draw outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Roster index of the winner
    pub index: usize,
    /// Drawn from the whole roster because nobody was running
    pub fallback: bool,
}

impl ScoringConfig {
    /// Weighted linear combination of the profile's skills
    pub fn base_score(&self, profile: &CompetitorProfile) -> f64 {
        self.weights
            .iter()
            .map(|(&attribute, &weight)| profile.rating(attribute) * weight)
            .sum()
    }

    /// Final (floored) score of one competitor
    pub fn score(&self, competitor: &CompetitorState<'_>, overtime: bool) -> f64 {
        let profile = competitor.profile();
        let mut score = self.base_score(profile);

        if self.damage_penalty > 0.0 {
            score *= 1.0 - competitor.incidents() as f64 * self.damage_penalty;
        }

        if overtime {
            for modifier in &self.overtime_modifiers {
                score *= modifier.factor(profile);
            }
        }

        if let Some(bonus) = self.tier_bonuses.get(&profile.tier()) {
            score *= bonus;
        }

        if let Some(bonus) = self.manufacturer_bonuses.get(profile.manufacturer()) {
            score *= bonus;
        }

        if self.elite_teams.iter().any(|t| t == profile.team()) {
            score *= self.elite_team_bonus;
        }

        score.max(self.score_floor)
    }

    /// Win probability of every running competitor, in roster order
    ///
    /// Empty when nobody is running.
    pub fn win_probabilities(&self, state: &RaceState<'_>) -> Vec<(usize, f64)> {
        let running = state.running_indices();
        if running.is_empty() {
            return Vec::new();
        }

        let scores: Vec<f64> = running
            .iter()
            .map(|&i| self.score(&state.competitors()[i], state.is_overtime()))
            .collect();

        running.into_iter().zip(normalize(&scores)).collect()
    }

    /// Draw the winner
    pub fn select_winner(&self, state: &RaceState<'_>, rng: &mut RngManager) -> Selection {
        let running = state.running_indices();

        if running.is_empty() {
            return Selection {
                index: rng.index(state.field_size()),
                fallback: true,
            };
        }

        let scores: Vec<f64> = running
            .iter()
            .map(|&i| self.score(&state.competitors()[i], state.is_overtime()))
            .collect();

        Selection {
            index: running[weighted_index(&scores, rng)],
            fallback: false,
        }
    }

    /// Attributes the scoring reads
    pub fn attributes(&self) -> Vec<Attribute> {
        self.weights
            .keys()
            .copied()
            .chain(self.overtime_modifiers.iter().map(|m| m.attribute))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weights.is_empty() {
            return Err(ConfigError::InvalidScoring(
                "at least one score weight is required".to_string(),
            ));
        }

        if let Some((attribute, weight)) = self
            .weights
            .iter()
            .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
        {
            return Err(ConfigError::InvalidScoring(format!(
                "weight for {} must be non-negative, got {}",
                attribute, weight
            )));
        }

        let total: f64 = self.weights.values().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { total });
        }

        check_probability("scoring", "damage_penalty", self.damage_penalty)?;

        for modifier in &self.overtime_modifiers {
            if !(modifier.divisor.is_finite() && modifier.divisor > 0.0) {
                return Err(ConfigError::InvalidScoring(format!(
                    "overtime modifier on {} needs a positive divisor",
                    modifier.attribute
                )));
            }
        }

        let bonuses = self
            .tier_bonuses
            .values()
            .chain(self.manufacturer_bonuses.values())
            .chain(std::iter::once(&self.elite_team_bonus));
        for bonus in bonuses {
            if !(bonus.is_finite() && *bonus > 0.0) {
                return Err(ConfigError::InvalidScoring(format!(
                    "bonus multipliers must be positive, got {}",
                    bonus
                )));
            }
        }

        if !(self.score_floor.is_finite() && self.score_floor > 0.0) {
            return Err(ConfigError::InvalidScoring(format!(
                "score floor must be positive, got {}",
                self.score_floor
            )));
        }

        Ok(())
    }
}
