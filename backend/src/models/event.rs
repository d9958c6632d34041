//! Race event logging for single-trial inspection.
//!
//! A trial can optionally keep a log of everything that happened on track:
//! incidents with their victims, stage breaks, overtime and the degenerate
//! winner fallback. Batch runs leave the log off.
//!
//! # Example
//!
//! ```rust
//! use race_sim_core::models::{EventLog, RaceEvent};
//!
//! let mut log = EventLog::new();
//! log.log(RaceEvent::StageBreak { lap: 15 });
//! assert_eq!(log.events_at_lap(15).len(), 1);
//! ```

use serde::Serialize;

/// What happened to a competitor drawn into an incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentOutcome {
    /// Out of the race
    Retired,
    /// Damaged but still running
    Damaged,
}

/// One victim of an incident
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Victim {
    pub name: String,
    pub outcome: IncidentOutcome,
}

/// Race event capturing a state change on a given lap
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RaceEvent {
    /// An incident event fired and brought out a caution
    Incident {
        lap: usize,
        event: String,
        victims: Vec<Victim>,
    },

    /// Scripted stoppage between stages
    StageBreak { lap: usize },

    /// Late caution forced an overtime finish
    Overtime { lap: usize, total_laps: usize },

    /// Every competitor was out; the winner was drawn from the whole roster
    FallbackWinner { lap: usize, winner: String },
}

impl RaceEvent {
    /// Lap the event happened on
    pub fn lap(&self) -> usize {
        match self {
            RaceEvent::Incident { lap, .. }
            | RaceEvent::StageBreak { lap }
            | RaceEvent::Overtime { lap, .. }
            | RaceEvent::FallbackWinner { lap, .. } => *lap,
        }
    }

    /// Variant name
    pub fn event_type(&self) -> &'static str {
        match self {
            RaceEvent::Incident { .. } => "Incident",
            RaceEvent::StageBreak { .. } => "StageBreak",
            RaceEvent::Overtime { .. } => "Overtime",
            RaceEvent::FallbackWinner { .. } => "FallbackWinner",
        }
    }

    /// True if the named competitor took part in the event
    pub fn involves(&self, name: &str) -> bool {
        match self {
            RaceEvent::Incident { victims, .. } => victims.iter().any(|v| v.name == name),
            RaceEvent::FallbackWinner { winner, .. } => winner == name,
            RaceEvent::StageBreak { .. } | RaceEvent::Overtime { .. } => false,
        }
    }
}

/// Ordered log of race events
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventLog {
    events: Vec<RaceEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: RaceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[RaceEvent] {
        &self.events
    }

    pub fn events_at_lap(&self, lap: usize) -> Vec<&RaceEvent> {
        self.events.iter().filter(|e| e.lap() == lap).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&RaceEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_competitor(&self, name: &str) -> Vec<&RaceEvent> {
        self.events.iter().filter(|e| e.involves(name)).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(lap: usize, names: &[&str]) -> RaceEvent {
        RaceEvent::Incident {
            lap,
            event: "racing_incident".to_string(),
            victims: names
                .iter()
                .map(|n| Victim {
                    name: n.to_string(),
                    outcome: IncidentOutcome::Retired,
                })
                .collect(),
        }
    }

    #[test]
    fn test_event_lap_and_type() {
        let event = RaceEvent::Overtime {
            lap: 257,
            total_laps: 262,
        };
        assert_eq!(event.lap(), 257);
        assert_eq!(event.event_type(), "Overtime");
    }

    #[test]
    fn test_event_log_queries() {
        let mut log = EventLog::new();
        log.log(incident(1, &["A", "B"]));
        log.log(RaceEvent::StageBreak { lap: 15 });
        log.log(incident(15, &["B"]));

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_at_lap(15).len(), 2);
        assert_eq!(log.events_of_type("Incident").len(), 2);
        assert_eq!(log.events_for_competitor("B").len(), 2);
        assert_eq!(log.events_for_competitor("A").len(), 1);
    }

    #[test]
    fn test_event_log_clear() {
        let mut log = EventLog::new();
        log.log(RaceEvent::StageBreak { lap: 30 });
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_string(&RaceEvent::StageBreak { lap: 15 }).unwrap();
        assert_eq!(json, r#"{"type":"StageBreak","lap":15}"#);
    }
}
