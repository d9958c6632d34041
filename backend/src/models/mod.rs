//! Domain models for the race simulator

pub mod competitor;
pub mod event;
pub mod profile;
pub mod result;
pub mod state;

// Re-exports
pub use competitor::{CompetitorState, PitStrategy};
pub use event::{EventLog, IncidentOutcome, RaceEvent, Victim};
pub use profile::{Attribute, CompetitorProfile, ProfileError, SkillTier};
pub use result::TrialResult;
pub use state::RaceState;
