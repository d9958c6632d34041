//! Console prediction report

use race_sim_core::aggregate::{RunManifest, Summary, WinShare};

const RULE_WIDTH: usize = 70;

fn banner(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", title);
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn win_table(rows: &[WinShare], top: usize) {
    println!("{:<30} {:>8} {:>8}", "Driver", "Wins", "Win %");
    println!("{}", "-".repeat(RULE_WIDTH));
    for row in rows.iter().take(top) {
        println!("{:<30} {:>8} {:>7.2}%", row.label, row.wins, row.share * 100.0);
    }
}

fn category_table(rows: &[WinShare]) {
    for row in rows {
        println!("{}: {} wins ({:.1}%)", row.label, row.wins, row.share * 100.0);
    }
}

pub fn print(summary: &Summary, manifest: &RunManifest, top: usize) {
    banner(&format!(
        "{} PREDICTIONS - {} SIMULATIONS",
        manifest.archetype.to_uppercase(),
        summary.trials
    ));
    let short_hash = manifest.config_hash.get(..12).unwrap_or(&manifest.config_hash);
    println!(
        "Seed {} | {} competitors | config {}",
        manifest.seed, manifest.field_size, short_hash
    );
    println!();
    println!("WIN PROBABILITIES (Top {}):", top);
    win_table(&summary.winners, top);

    banner("CHAOS STATISTICS");
    println!("Early Incident Rate: {:.1}%", summary.early_incident_rate * 100.0);
    if let Some(lap) = summary.mean_early_incident_lap {
        println!("Average Early Incident Lap: {:.1}", lap);
    }
    println!("Overtime Rate: {:.1}%", summary.overtime_rate * 100.0);
    println!("Average Cautions: {:.1}", summary.mean_cautions);
    println!("Average Attrition Rate: {:.1}% DNF", summary.mean_attrition * 100.0);
    println!("Average Retirements: {:.1}", summary.mean_retirements);
    println!("Average Running at Finish: {:.1}", summary.mean_survivors);
    if summary.fallback_winners > 0 {
        println!("Fallback Winners (empty field): {}", summary.fallback_winners);
    }

    banner("SCENARIO ANALYSIS");
    println!(
        "Clean Start: {} races ({:.1}%)",
        summary.clean_start.trials,
        summary.clean_start.rate * 100.0
    );
    win_table(&summary.clean_start.winners, 5);
    println!();
    println!(
        "Early Incident: {} races ({:.1}%)",
        summary.early_incident.trials,
        summary.early_incident.rate * 100.0
    );
    win_table(&summary.early_incident.winners, 5);

    banner("MANUFACTURER PERFORMANCE");
    category_table(&summary.by_manufacturer);

    banner("WINS BY TIER");
    category_table(&summary.by_tier);

    if !summary.by_strategy.is_empty() {
        banner("WINS BY PIT STRATEGY");
        category_table(&summary.by_strategy);
    }
    println!();
}
