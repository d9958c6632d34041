//! Built-in competitor fields
//!
//! Default rosters for the two archetype presets. Skills are on the 0-10
//! scale; recent form is carried explicitly for every entry.

use crate::archetype::TrackArchetype;
use crate::models::profile::{Attribute, CompetitorProfile, SkillTier};

type Entry<const N: usize> = (&'static str, u32, &'static str, &'static str, SkillTier, [f64; N]);

const OVAL_ATTRIBUTES: [Attribute; 10] = [
    Attribute::BaseSpeed,
    Attribute::TireManagement,
    Attribute::DraftingIq,
    Attribute::RestartSkill,
    Attribute::Aggression,
    Attribute::ChaosSurvival,
    Attribute::LongRunSpeed,
    Attribute::ShortRunSpeed,
    Attribute::ClutchFactor,
    Attribute::RecentForm,
];

const ROAD_COURSE_ATTRIBUTES: [Attribute; 11] = [
    Attribute::RoadCourseSkill,
    Attribute::BrakingZones,
    Attribute::CornerEntry,
    Attribute::CornerExit,
    Attribute::PassingAbility,
    Attribute::TirePreservation,
    Attribute::FuelStrategy,
    Attribute::Recovery,
    Attribute::Aggression,
    Attribute::ClutchFactor,
    Attribute::RecentForm,
];

#[rustfmt::skip]
const OVAL_FIELD: [Entry<10>; 20] = [
    ("Kyle Larson", 5, "Hendrick", "Chevrolet", SkillTier::Elite, [9.5, 8.5, 8.0, 9.0, 8.0, 6.5, 9.5, 9.0, 9.0, 6.0]),
    ("Chase Elliott", 9, "Hendrick", "Chevrolet", SkillTier::Elite, [9.0, 9.0, 8.5, 8.5, 6.5, 7.5, 9.0, 8.5, 8.5, 5.5]),
    ("William Byron", 24, "Hendrick", "Chevrolet", SkillTier::Elite, [9.0, 8.0, 8.0, 8.5, 7.0, 7.0, 8.5, 9.0, 8.5, 4.5]),
    ("Alex Bowman", 48, "Hendrick", "Chevrolet", SkillTier::Strong, [8.0, 7.5, 7.5, 7.0, 6.0, 8.0, 7.5, 7.5, 7.0, 5.0]),
    ("Denny Hamlin", 11, "Joe Gibbs", "Toyota", SkillTier::Elite, [9.0, 9.0, 9.5, 9.5, 8.5, 8.5, 8.5, 9.0, 9.5, 6.0]),
    ("Christopher Bell", 20, "Joe Gibbs", "Toyota", SkillTier::Elite, [8.5, 8.0, 7.5, 8.0, 7.5, 7.0, 8.5, 8.0, 8.0, 5.0]),
    ("Ty Gibbs", 54, "Joe Gibbs", "Toyota", SkillTier::Strong, [7.5, 7.0, 6.5, 7.0, 7.0, 6.0, 7.0, 7.5, 6.5, 5.0]),
    ("Chase Briscoe", 19, "Joe Gibbs", "Toyota", SkillTier::Strong, [7.5, 7.5, 7.0, 7.5, 7.5, 7.0, 7.5, 7.5, 7.5, 5.5]),
    ("Tyler Reddick", 45, "23XI", "Toyota", SkillTier::Elite, [8.5, 8.5, 8.5, 8.5, 8.0, 7.5, 8.5, 8.5, 8.5, 9.5]),
    ("Bubba Wallace", 23, "23XI", "Toyota", SkillTier::Strong, [7.5, 7.0, 7.5, 7.5, 7.0, 7.0, 7.0, 7.5, 7.0, 5.5]),
    ("Ryan Blaney", 12, "Penske", "Ford", SkillTier::Elite, [8.5, 8.5, 9.0, 9.0, 7.5, 8.5, 8.5, 9.0, 9.0, 6.0]),
    ("Joey Logano", 22, "Penske", "Ford", SkillTier::Elite, [8.5, 8.0, 9.5, 9.5, 8.5, 8.0, 8.0, 9.0, 9.5, 4.5]),
    ("Austin Cindric", 2, "Penske", "Ford", SkillTier::Strong, [7.5, 7.5, 8.0, 8.0, 7.0, 7.5, 7.5, 8.0, 8.5, 5.5]),
    ("Brad Keselowski", 6, "RFK", "Ford", SkillTier::Strong, [8.0, 8.5, 8.5, 8.0, 7.5, 7.5, 8.0, 8.0, 8.0, 6.5]),
    ("Chris Buescher", 17, "RFK", "Ford", SkillTier::Strong, [7.5, 8.0, 7.5, 7.5, 6.5, 7.5, 7.5, 7.0, 7.5, 5.5]),
    ("Ross Chastain", 1, "Trackhouse", "Chevrolet", SkillTier::Strong, [8.0, 6.5, 6.5, 7.5, 10.0, 4.0, 7.5, 8.0, 7.5, 5.0]),
    ("Daniel Suarez", 7, "Spire", "Chevrolet", SkillTier::Strong, [7.5, 7.5, 7.5, 8.0, 7.0, 7.0, 7.5, 7.5, 8.5, 5.0]),
    ("Kyle Busch", 8, "RCR", "Chevrolet", SkillTier::Strong, [8.0, 8.5, 7.5, 8.5, 8.0, 6.5, 8.0, 8.0, 8.0, 5.0]),
    ("Ricky Stenhouse Jr.", 47, "HYAK", "Chevrolet", SkillTier::Strong, [7.0, 7.0, 8.5, 8.0, 9.0, 7.5, 7.0, 7.5, 8.5, 7.5]),
    ("Michael McDowell", 71, "Spire", "Chevrolet", SkillTier::Mid, [6.5, 7.5, 8.5, 7.5, 7.5, 8.5, 6.5, 7.0, 8.0, 5.0]),
];

#[rustfmt::skip]
const ROAD_COURSE_FIELD: [Entry<11>; 16] = [
    ("AJ Allmendinger", 16, "Kaulig", "Chevrolet", SkillTier::Specialist, [9.5, 9.0, 9.5, 9.0, 9.5, 8.5, 8.5, 9.0, 8.0, 9.0, 5.0]),
    ("Shane van Gisbergen", 97, "Trackhouse", "Chevrolet", SkillTier::Specialist, [9.5, 9.5, 9.5, 9.5, 9.0, 9.0, 8.0, 8.5, 8.5, 8.5, 6.5]),
    ("Tyler Reddick", 45, "23XI", "Toyota", SkillTier::Elite, [9.0, 8.5, 9.0, 8.5, 8.5, 8.5, 8.0, 8.5, 8.0, 8.5, 9.5]),
    ("Christopher Bell", 20, "Joe Gibbs", "Toyota", SkillTier::Elite, [9.0, 9.0, 8.5, 8.5, 8.5, 8.5, 8.5, 8.0, 7.5, 8.5, 6.0]),
    ("William Byron", 24, "Hendrick", "Chevrolet", SkillTier::Elite, [8.5, 8.5, 8.5, 8.5, 8.0, 8.5, 8.0, 8.0, 7.0, 8.5, 4.5]),
    ("Kyle Larson", 5, "Hendrick", "Chevrolet", SkillTier::Elite, [8.5, 8.0, 8.5, 9.0, 8.5, 8.0, 7.5, 8.5, 8.0, 9.0, 6.0]),
    ("Ross Chastain", 1, "Trackhouse", "Chevrolet", SkillTier::Strong, [8.5, 8.0, 7.5, 8.5, 9.5, 7.0, 7.0, 7.5, 10.0, 8.0, 5.0]),
    ("Chase Elliott", 9, "Hendrick", "Chevrolet", SkillTier::Elite, [8.0, 8.0, 8.0, 8.0, 7.5, 8.5, 8.5, 9.0, 6.5, 8.5, 5.5]),
    ("Alex Bowman", 48, "Hendrick", "Chevrolet", SkillTier::Strong, [7.5, 7.5, 7.5, 7.5, 7.0, 8.0, 7.5, 8.0, 6.0, 7.0, 5.0]),
    ("Chris Buescher", 17, "RFK", "Ford", SkillTier::Strong, [7.5, 7.5, 7.5, 7.0, 7.5, 8.0, 8.5, 7.5, 6.5, 7.5, 5.5]),
    ("Kyle Busch", 8, "RCR", "Chevrolet", SkillTier::Strong, [8.0, 8.0, 7.5, 8.0, 8.5, 7.5, 7.5, 7.5, 8.0, 8.0, 5.0]),
    ("Ryan Blaney", 12, "Penske", "Ford", SkillTier::Strong, [7.5, 7.5, 7.5, 7.5, 7.5, 7.5, 7.5, 7.5, 7.5, 9.0, 6.0]),
    ("Joey Logano", 22, "Penske", "Ford", SkillTier::Strong, [7.5, 7.5, 7.0, 7.5, 8.0, 7.0, 7.5, 7.0, 8.5, 9.5, 4.5]),
    ("Denny Hamlin", 11, "Joe Gibbs", "Toyota", SkillTier::Elite, [7.0, 7.0, 7.0, 7.0, 7.5, 8.0, 8.5, 7.5, 8.5, 9.5, 6.0]),
    ("Daniel Suarez", 7, "Spire", "Chevrolet", SkillTier::Mid, [7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.5, 5.0]),
    ("Connor Zilisch", 88, "Trackhouse", "Chevrolet", SkillTier::Mid, [8.0, 8.0, 8.5, 8.0, 7.0, 6.5, 6.0, 6.5, 8.5, 7.0, 5.0]),
];

fn build<const N: usize>(entries: &[Entry<N>], attributes: &[Attribute; N]) -> Vec<CompetitorProfile> {
    entries
        .iter()
        .map(|(name, number, team, manufacturer, tier, values)| {
            attributes.iter().zip(values.iter()).fold(
                CompetitorProfile::new(*name, *number, *team, *manufacturer, *tier),
                |profile, (&attribute, &value)| profile.with_skill(attribute, value),
            )
        })
        .collect()
}

/// 20-car field for the oval preset
pub fn oval_field() -> Vec<CompetitorProfile> {
    build(&OVAL_FIELD, &OVAL_ATTRIBUTES)
}

/// 16-car field for the road-course preset
pub fn road_course_field() -> Vec<CompetitorProfile> {
    build(&ROAD_COURSE_FIELD, &ROAD_COURSE_ATTRIBUTES)
}

/// Default field for an archetype
pub fn for_archetype(archetype: TrackArchetype) -> Vec<CompetitorProfile> {
    match archetype {
        TrackArchetype::Oval => oval_field(),
        TrackArchetype::RoadCourse => road_course_field(),
    }
}
