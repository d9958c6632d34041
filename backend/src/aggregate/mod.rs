//! Monte Carlo aggregation
//!
//! Runs batches of trials and reduces their results to summary statistics.

pub mod runner;
pub mod summary;

pub use runner::{MonteCarloRunner, RunManifest};
pub use summary::{ScenarioBreakdown, Summary, WinShare};
