//! Incident event application
//!
//! Evaluates one [`IncidentEventConfig`] against the race state for one lap.
//!
//! Randomness is consumed in a fixed order: trigger roll, victim count,
//! victim draws, then one severity roll per drawn victim (skipped when the
//! event always retires). The order never depends on outcomes, so two runs
//! from the same generator state agree draw for draw.

use super::IncidentEventConfig;
use crate::models::event::{IncidentOutcome, RaceEvent, Victim};
use crate::models::state::RaceState;
use crate::rng::{weighted_sample, RngManager};
use tracing::debug;

/// What one firing of an incident event did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncidentReport {
    /// Draws made (with replacement, the same competitor may count twice)
    pub victims: usize,
    pub retired: usize,
    pub damaged: usize,
}

/// Largest number of victims an event may draw
///
/// Never more than the nominal count, and never so many that fewer than
/// `min_survivors` competitors could remain running.
///
/// # Example
/// ```
/// use race_sim_core::incidents::victim_cap;
///
/// // 5 running, floor of 2: at most 3 victims even if 12 were drawn
/// assert_eq!(victim_cap(12, 5, 2), 3);
/// assert_eq!(victim_cap(2, 5, 2), 2);
/// assert_eq!(victim_cap(4, 1, 2), 0);
/// ```
pub fn victim_cap(nominal: usize, running: usize, min_survivors: usize) -> usize {
    nominal.min(running.saturating_sub(min_survivors))
}

/// Evaluate one incident event on `lap`
///
/// Returns `None` when the event is outside its lap window, already latched,
/// loses its trigger roll, or finds nobody running. Otherwise the event has
/// fired: victims are drawn and resolved, and a caution is recorded on `lap`.
pub fn apply_event(
    event_index: usize,
    config: &IncidentEventConfig,
    lap: usize,
    min_survivors: usize,
    state: &mut RaceState<'_>,
    rng: &mut RngManager,
) -> Option<IncidentReport> {
    if !config.laps.contains(lap) {
        return None;
    }
    if config.once_per_race && state.has_fired(event_index) {
        return None;
    }
    if !rng.chance(config.probability_at(lap)) {
        return None;
    }

    let running = state.running_indices();
    if running.is_empty() {
        return None;
    }

    if config.once_per_race {
        state.mark_fired(event_index);
    }
    if config.marks_early_incident {
        state.mark_early_incident(lap);
    }

    let nominal = rng.range_inclusive(config.victims.min, config.victims.max);
    let count = victim_cap(nominal, running.len(), min_survivors);

    let weights: Vec<f64> = if count == 0 {
        Vec::new()
    } else {
        running
            .iter()
            .map(|&i| config.weighting.weight(state.competitors()[i].profile()))
            .collect()
    };
    let drawn = weighted_sample(&weights, count, config.replacement, rng);

    let mut report = IncidentReport {
        victims: drawn.len(),
        ..IncidentReport::default()
    };
    let mut victims = Vec::with_capacity(drawn.len());

    for slot in drawn {
        let index = running[slot];
        let retire = config.retire_probability >= 1.0 || rng.chance(config.retire_probability);

        let competitor = state.competitor_mut(index);
        if !competitor.is_running() {
            // Drawn again after retiring earlier in this same incident
            continue;
        }

        let outcome = if retire {
            competitor.retire();
            report.retired += 1;
            IncidentOutcome::Retired
        } else {
            competitor.damage();
            report.damaged += 1;
            IncidentOutcome::Damaged
        };

        victims.push(Victim {
            name: competitor.name().to_string(),
            outcome,
        });
    }

    state.add_caution(lap);

    debug!(
        event = %config.name,
        lap,
        nominal,
        drawn = report.victims,
        retired = report.retired,
        damaged = report.damaged,
        "incident"
    );

    state.log(RaceEvent::Incident {
        lap,
        event: config.name.clone(),
        victims,
    });

    Some(report)
}
