//! Competitor profile model
//!
//! A profile is the immutable description of one driver/car entry:
//! identity, categorical metadata and a sheet of skill attributes on a
//! bounded 0–10 scale. Profiles are built once (from the built-in rosters or
//! a JSON file) and are only ever read by the engine; each trial's mutable
//! state lives in [`crate::models::competitor::CompetitorState`].
//!
//! CRITICAL: Skill values are always within [`SKILL_MIN`, `SKILL_MAX`].

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Lowest value on the skill scale
pub const SKILL_MIN: f64 = 0.0;

/// Highest value on the skill scale
pub const SKILL_MAX: f64 = 10.0;

/// Recent form assigned when a profile does not state one
pub const NEUTRAL_FORM: f64 = 5.0;

/// Errors found while validating a profile
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Competitor name must not be empty")]
    EmptyName,

    #[error("{competitor}: {attribute} = {value} is outside the 0-10 skill scale")]
    SkillOutOfRange {
        competitor: String,
        attribute: Attribute,
        value: f64,
    },

    #[error("{competitor}: missing required attribute {attribute}")]
    MissingAttribute {
        competitor: String,
        attribute: Attribute,
    },
}

/// Named skill attributes
///
/// The oval and road-course archetypes read different subsets; both share
/// `Aggression`, `ClutchFactor` and `RecentForm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    // Shared
    Aggression,
    ClutchFactor,
    RecentForm,

    // Oval
    BaseSpeed,
    TireManagement,
    DraftingIq,
    RestartSkill,
    ChaosSurvival,
    LongRunSpeed,
    ShortRunSpeed,

    // Road course
    RoadCourseSkill,
    BrakingZones,
    CornerEntry,
    CornerExit,
    PassingAbility,
    TirePreservation,
    FuelStrategy,
    Recovery,
}

impl Attribute {
    /// snake_case name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Aggression => "aggression",
            Attribute::ClutchFactor => "clutch_factor",
            Attribute::RecentForm => "recent_form",
            Attribute::BaseSpeed => "base_speed",
            Attribute::TireManagement => "tire_management",
            Attribute::DraftingIq => "drafting_iq",
            Attribute::RestartSkill => "restart_skill",
            Attribute::ChaosSurvival => "chaos_survival",
            Attribute::LongRunSpeed => "long_run_speed",
            Attribute::ShortRunSpeed => "short_run_speed",
            Attribute::RoadCourseSkill => "road_course_skill",
            Attribute::BrakingZones => "braking_zones",
            Attribute::CornerEntry => "corner_entry",
            Attribute::CornerExit => "corner_exit",
            Attribute::PassingAbility => "passing_ability",
            Attribute::TirePreservation => "tire_preservation",
            Attribute::FuelStrategy => "fuel_strategy",
            Attribute::Recovery => "recovery",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill tier of a competitor (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTier {
    Elite,
    Strong,
    Mid,
    /// Discipline specialist (e.g. road-course ace)
    Specialist,
}

impl SkillTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillTier::Elite => "elite",
            SkillTier::Strong => "strong",
            SkillTier::Mid => "mid",
            SkillTier::Specialist => "specialist",
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable competitor profile
///
/// # Example
/// ```
/// use race_sim_core::{Attribute, CompetitorProfile, SkillTier};
///
/// let profile = CompetitorProfile::new("Kyle Larson", 5, "Hendrick", "Chevrolet", SkillTier::Elite)
///     .with_skill(Attribute::Aggression, 8.0)
///     .with_skill(Attribute::RecentForm, 6.0);
///
/// assert_eq!(profile.rating(Attribute::Aggression), 8.0);
/// assert_eq!(profile.rating(Attribute::RecentForm), 6.0);
/// assert!(profile.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    name: String,
    number: u32,
    team: String,
    manufacturer: String,
    tier: SkillTier,

    /// Skill sheet; every entry on the 0–10 scale
    #[serde(deserialize_with = "skills_with_form")]
    skills: BTreeMap<Attribute, f64>,
}

/// Loaded skill sheets fall back to a neutral recent form
fn skills_with_form<'de, D>(deserializer: D) -> Result<BTreeMap<Attribute, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut skills = BTreeMap::<Attribute, f64>::deserialize(deserializer)?;
    skills.entry(Attribute::RecentForm).or_insert(NEUTRAL_FORM);
    Ok(skills)
}

impl CompetitorProfile {
    /// Create a profile with a neutral recent form and no other skills
    pub fn new(
        name: impl Into<String>,
        number: u32,
        team: impl Into<String>,
        manufacturer: impl Into<String>,
        tier: SkillTier,
    ) -> Self {
        let mut skills = BTreeMap::new();
        skills.insert(Attribute::RecentForm, NEUTRAL_FORM);

        Self {
            name: name.into(),
            number,
            team: team.into(),
            manufacturer: manufacturer.into(),
            tier,
            skills,
        }
    }

    /// Set one skill value (builder style)
    pub fn with_skill(mut self, attribute: Attribute, value: f64) -> Self {
        self.skills.insert(attribute, value);
        self
    }

    /// Set several skill values at once
    pub fn with_skills(mut self, values: &[(Attribute, f64)]) -> Self {
        for &(attribute, value) in values {
            self.skills.insert(attribute, value);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn tier(&self) -> SkillTier {
        self.tier
    }

    pub fn skills(&self) -> &BTreeMap<Attribute, f64> {
        &self.skills
    }

    /// Skill value if the profile carries it
    pub fn skill(&self, attribute: Attribute) -> Option<f64> {
        self.skills.get(&attribute).copied()
    }

    /// Skill value, 0.0 when absent
    ///
    /// Engines check [`CompetitorProfile::require`] at construction, so
    /// during a trial every attribute they read is present.
    pub fn rating(&self, attribute: Attribute) -> f64 {
        self.skill(attribute).unwrap_or(SKILL_MIN)
    }

    /// Check name and skill bounds
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }

        for (&attribute, &value) in &self.skills {
            if !(SKILL_MIN..=SKILL_MAX).contains(&value) {
                return Err(ProfileError::SkillOutOfRange {
                    competitor: self.name.clone(),
                    attribute,
                    value,
                });
            }
        }

        Ok(())
    }

    /// Check the profile carries every attribute in `required`
    pub fn require(&self, required: &BTreeSet<Attribute>) -> Result<(), ProfileError> {
        match required.iter().find(|a| !self.skills.contains_key(a)) {
            Some(&attribute) => Err(ProfileError::MissingAttribute {
                competitor: self.name.clone(),
                attribute,
            }),
            None => Ok(()),
        }
    }
}
