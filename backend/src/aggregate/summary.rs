//! Batch summary statistics
//!
//! Reduces a batch of [`TrialResult`]s to win tables, scenario rates and a
//! clean-start versus early-incident breakdown. Statistics never depend on
//! the order of the results.

use crate::models::result::TrialResult;
use crate::orchestrator::SimulationEngine;
use serde::Serialize;
use std::collections::BTreeMap;

/// Wins for one competitor or category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinShare {
    pub label: String,
    pub wins: u64,
    /// wins / trials in the table's trial set
    pub share: f64,
}

/// Results restricted to one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioBreakdown {
    pub trials: u64,
    /// Fraction of the whole batch in this scenario
    pub rate: f64,
    pub winners: Vec<WinShare>,
}

/// Statistics over one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub trials: u64,

    /// Competitor win table, most wins first
    pub winners: Vec<WinShare>,
    pub by_manufacturer: Vec<WinShare>,
    pub by_tier: Vec<WinShare>,
    /// Empty when the archetype assigns no pit strategies
    pub by_strategy: Vec<WinShare>,

    pub early_incident_rate: f64,
    /// Mean lap of the early incident, over trials that had one
    pub mean_early_incident_lap: Option<f64>,
    pub overtime_rate: f64,
    pub mean_cautions: f64,
    pub mean_attrition: f64,
    pub mean_retirements: f64,
    pub mean_survivors: f64,
    pub fallback_winners: u64,

    pub clean_start: ScenarioBreakdown,
    pub early_incident: ScenarioBreakdown,
}

impl Summary {
    pub fn from_results(results: &[TrialResult]) -> Self {
        let trials = results.len() as u64;

        let (clean, early): (Vec<&TrialResult>, Vec<&TrialResult>) =
            results.iter().partition(|r| r.is_clean_start());

        let early_laps: Vec<f64> = early
            .iter()
            .filter_map(|r| r.early_incident_lap)
            .map(|lap| lap as f64)
            .collect();

        Self {
            trials,
            winners: win_table(results.iter().map(|r| r.winner.clone())),
            by_manufacturer: win_table(results.iter().map(|r| r.manufacturer.clone())),
            by_tier: win_table(results.iter().map(|r| r.tier.to_string())),
            by_strategy: win_table(
                results
                    .iter()
                    .filter_map(|r| r.winner_strategy.map(|s| s.to_string())),
            ),
            early_incident_rate: ratio(early.len() as u64, trials),
            mean_early_incident_lap: mean(&early_laps),
            overtime_rate: ratio(results.iter().filter(|r| r.overtime).count() as u64, trials),
            mean_cautions: mean_of(results, |r| r.total_cautions as f64),
            mean_attrition: mean_of(results, |r| r.attrition_rate),
            mean_retirements: mean_of(results, |r| r.retirements() as f64),
            mean_survivors: mean_of(results, |r| r.running_at_finish as f64),
            fallback_winners: results.iter().filter(|r| r.fallback_winner).count() as u64,
            clean_start: breakdown(&clean, trials),
            early_incident: breakdown(&early, trials),
        }
    }

    /// Empirical win share of one competitor (0 if it never won)
    pub fn win_share(&self, name: &str) -> f64 {
        self.winners
            .iter()
            .find(|w| w.label == name)
            .map_or(0.0, |w| w.share)
    }

    /// Analytical win share of every competitor at the green flag
    ///
    /// What the empirical shares converge to when no incident or overtime
    /// changes the field.
    pub fn expected_win_share(engine: &SimulationEngine) -> BTreeMap<String, f64> {
        engine
            .green_flag_probabilities()
            .into_iter()
            .map(|(index, p)| (engine.roster()[index].name().to_string(), p))
            .collect()
    }
}

/// Count labels and sort by wins (descending), then label
fn win_table(labels: impl Iterator<Item = String>) -> Vec<WinShare> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let total: u64 = counts.values().sum();
    let mut table: Vec<WinShare> = counts
        .into_iter()
        .map(|(label, wins)| WinShare {
            label,
            wins,
            share: ratio(wins, total),
        })
        .collect();

    // BTreeMap order breaks ties by label; the sort is stable
    table.sort_by(|a, b| b.wins.cmp(&a.wins));
    table
}

fn breakdown(results: &[&TrialResult], batch_trials: u64) -> ScenarioBreakdown {
    ScenarioBreakdown {
        trials: results.len() as u64,
        rate: ratio(results.len() as u64, batch_trials),
        winners: win_table(results.iter().map(|r| r.winner.clone())),
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn mean_of(results: &[TrialResult], f: impl Fn(&TrialResult) -> f64) -> f64 {
    let values: Vec<f64> = results.iter().map(f).collect();
    mean(&values).unwrap_or(0.0)
}
