//! Race State
//!
//! Represents the complete state of one simulated race: every competitor's
//! per-trial fields plus the race-wide record of cautions and scenario flags.
//!
//! # Critical Invariants
//!
//! 1. **Monotone field**: the number of running competitors never increases
//! 2. **Isolation**: a state borrows the roster immutably and owns everything
//!    it mutates, so concurrent trials never interfere
//! 3. **Latches**: an at-most-once incident event fires at most once per state

use crate::models::competitor::{CompetitorState, PitStrategy};
use crate::models::event::{EventLog, RaceEvent};
use crate::models::profile::CompetitorProfile;
use crate::rng::RngManager;
use std::collections::BTreeSet;

/// Complete state of one trial
///
/// # Example
///
/// ```rust
/// use race_sim_core::{CompetitorProfile, RaceState, RngManager, SkillTier};
///
/// let roster = vec![
///     CompetitorProfile::new("A", 1, "Team A", "Ford", SkillTier::Elite),
///     CompetitorProfile::new("B", 2, "Team B", "Toyota", SkillTier::Mid),
/// ];
///
/// let mut rng = RngManager::new(1);
/// let state = RaceState::new(&roster, &[], &mut rng);
/// assert_eq!(state.field_size(), 2);
/// assert_eq!(state.running_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RaceState<'a> {
    /// One entry per roster profile, in roster order
    competitors: Vec<CompetitorState<'a>>,

    /// Laps on which a caution came out, in order (duplicates allowed)
    caution_laps: Vec<usize>,

    /// Indices of at-most-once incident events that already fired
    fired_events: BTreeSet<usize>,

    /// First lap an early-incident event fired on
    early_incident_lap: Option<usize>,

    /// Overtime finish triggered
    overtime: bool,

    /// Race event log (only when requested)
    event_log: Option<EventLog>,
}

impl<'a> RaceState<'a> {
    /// Build the green-flag state for one trial
    ///
    /// When `strategy_slots` is non-empty, every competitor draws a pit
    /// strategy uniformly from the slots (a slot list of three `Normal` and
    /// one `Aggressive` gives a 75/25 split). Draws happen in roster order.
    pub fn new(
        roster: &'a [CompetitorProfile],
        strategy_slots: &[PitStrategy],
        rng: &mut RngManager,
    ) -> Self {
        let competitors = roster
            .iter()
            .map(|profile| {
                let strategy = if strategy_slots.is_empty() {
                    None
                } else {
                    Some(strategy_slots[rng.index(strategy_slots.len())])
                };
                CompetitorState::new(profile, strategy)
            })
            .collect();

        Self {
            competitors,
            caution_laps: Vec::new(),
            fired_events: BTreeSet::new(),
            early_incident_lap: None,
            overtime: false,
            event_log: None,
        }
    }

    /// Record race events for this trial
    pub fn with_event_log(mut self) -> Self {
        self.event_log = Some(EventLog::new());
        self
    }

    pub fn competitors(&self) -> &[CompetitorState<'a>] {
        &self.competitors
    }

    pub fn competitor_mut(&mut self, index: usize) -> &mut CompetitorState<'a> {
        &mut self.competitors[index]
    }

    /// Roster indices of competitors still running, in roster order
    pub fn running_indices(&self) -> Vec<usize> {
        self.competitors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_running())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn running_count(&self) -> usize {
        self.competitors.iter().filter(|c| c.is_running()).count()
    }

    pub fn field_size(&self) -> usize {
        self.competitors.len()
    }

    /// Fraction of the field no longer running
    pub fn attrition_rate(&self) -> f64 {
        if self.competitors.is_empty() {
            return 0.0;
        }
        let out = self.field_size() - self.running_count();
        out as f64 / self.field_size() as f64
    }

    pub fn add_caution(&mut self, lap: usize) {
        self.caution_laps.push(lap);
    }

    pub fn caution_laps(&self) -> &[usize] {
        &self.caution_laps
    }

    pub fn has_fired(&self, event_index: usize) -> bool {
        self.fired_events.contains(&event_index)
    }

    pub fn mark_fired(&mut self, event_index: usize) {
        self.fired_events.insert(event_index);
    }

    /// Record an early incident; only the first lap is kept
    pub fn mark_early_incident(&mut self, lap: usize) {
        self.early_incident_lap.get_or_insert(lap);
    }

    pub fn early_incident_lap(&self) -> Option<usize> {
        self.early_incident_lap
    }

    pub fn trigger_overtime(&mut self) {
        self.overtime = true;
    }

    pub fn is_overtime(&self) -> bool {
        self.overtime
    }

    /// Append to the event log if one is being kept
    pub fn log(&mut self, event: RaceEvent) {
        if let Some(log) = self.event_log.as_mut() {
            log.log(event);
        }
    }

    pub fn event_log(&self) -> Option<&EventLog> {
        self.event_log.as_ref()
    }

    pub fn into_event_log(self) -> Option<EventLog> {
        self.event_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::SkillTier;

    fn roster(n: usize) -> Vec<CompetitorProfile> {
        (0..n)
            .map(|i| CompetitorProfile::new(format!("D{}", i), i as u32, "T", "M", SkillTier::Mid))
            .collect()
    }

    #[test]
    fn test_new_state_all_running() {
        let roster = roster(4);
        let mut rng = RngManager::new(1);
        let state = RaceState::new(&roster, &[], &mut rng);

        assert_eq!(state.running_count(), 4);
        assert_eq!(state.attrition_rate(), 0.0);
        assert!(state.competitors().iter().all(|c| c.pit_strategy().is_none()));
        assert!(state.caution_laps().is_empty());
    }

    #[test]
    fn test_no_strategy_slots_consumes_no_randomness() {
        let roster = roster(4);
        let mut rng = RngManager::new(1);
        let before = rng.get_state();
        RaceState::new(&roster, &[], &mut rng);
        assert_eq!(rng.get_state(), before);
    }

    #[test]
    fn test_strategy_drawn_from_slots() {
        let roster = roster(50);
        let mut rng = RngManager::new(9);
        let state = RaceState::new(&roster, &[PitStrategy::Aggressive], &mut rng);

        assert!(state
            .competitors()
            .iter()
            .all(|c| c.pit_strategy() == Some(PitStrategy::Aggressive)));
    }

    #[test]
    fn test_attrition_after_retirements() {
        let roster = roster(4);
        let mut rng = RngManager::new(1);
        let mut state = RaceState::new(&roster, &[], &mut rng);

        state.competitor_mut(0).retire();
        state.competitor_mut(3).retire();

        assert_eq!(state.running_indices(), vec![1, 2]);
        assert_eq!(state.attrition_rate(), 0.5);
    }

    #[test]
    fn test_early_incident_keeps_first_lap() {
        let roster = roster(2);
        let mut rng = RngManager::new(1);
        let mut state = RaceState::new(&roster, &[], &mut rng);

        state.mark_early_incident(2);
        state.mark_early_incident(4);

        assert_eq!(state.early_incident_lap(), Some(2));
    }

    #[test]
    fn test_log_is_noop_without_event_log() {
        let roster = roster(2);
        let mut rng = RngManager::new(1);
        let mut state = RaceState::new(&roster, &[], &mut rng);

        state.log(RaceEvent::StageBreak { lap: 15 });
        assert!(state.event_log().is_none());
    }
}
