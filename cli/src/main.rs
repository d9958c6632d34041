mod export;
mod report;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use race_sim_core::{
    roster, ArchetypeConfig, CompetitorProfile, MonteCarloRunner, SimulationEngine, Summary,
    TrackArchetype,
};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "race-sim", version, about = "Monte Carlo motorsport race simulator")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a Monte Carlo batch and prints the prediction report.
    Run(RunArgs),
    /// Prints a built-in roster or archetype config as JSON.
    Preset {
        #[arg(long, value_enum)]
        track: Track,
        /// Print the roster instead of the archetype config.
        #[arg(long)]
        roster: bool,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[arg(long, value_enum)]
    track: Track,
    #[arg(long, default_value_t = 10_000)]
    trials: u64,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
    /// JSON roster replacing the built-in field
    #[arg(long)]
    roster: Option<PathBuf>,
    /// JSON archetype config replacing the built-in preset
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write one CSV row per trial
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write the summary and run manifest as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,
    /// Rows in the win table
    #[arg(long, default_value_t = 15)]
    top: usize,
    /// Print the event log of one trial of the batch as JSON
    #[arg(long, value_name = "TRIAL")]
    trace_trial: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Track {
    Oval,
    RoadCourse,
}

impl From<Track> for TrackArchetype {
    fn from(track: Track) -> Self {
        match track {
            Track::Oval => TrackArchetype::Oval,
            Track::RoadCourse => TrackArchetype::RoadCourse,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Preset { track, roster } => preset(track.into(), roster),
    }
}

/// Logs go to stderr so the report on stdout stays clean.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env("RACE_SIM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn run(args: RunArgs) -> Result<()> {
    let archetype = TrackArchetype::from(args.track);

    let field: Vec<CompetitorProfile> = match &args.roster {
        Some(path) => read_json(path)?,
        None => roster::for_archetype(archetype),
    };
    let config: ArchetypeConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => ArchetypeConfig::preset(archetype),
    };

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let engine = SimulationEngine::new(field, config).context("invalid simulation setup")?;
    let runner = MonteCarloRunner::new(engine);
    let manifest = runner
        .manifest(args.trials, args.seed)
        .context("failed to fingerprint configuration")?;
    info!(config_hash = %manifest.config_hash, "configuration fingerprinted");

    let results = runner.run_parallel(args.trials, args.seed);
    let summary = Summary::from_results(&results);

    report::print(&summary, &manifest, args.top);

    if let Some(path) = &args.csv {
        export::write_csv(path, &results)?;
        println!("Trial results saved to: {}", path.display());
    }
    if let Some(path) = &args.summary_json {
        export::write_summary(path, &manifest, &summary)?;
        println!("Summary saved to: {}", path.display());
    }
    if let Some(trial) = args.trace_trial {
        println!("{}", export::trace_trial(runner.engine(), args.seed, trial)?);
    }

    Ok(())
}

fn preset(archetype: TrackArchetype, show_roster: bool) -> Result<()> {
    let json = if show_roster {
        serde_json::to_string_pretty(&roster::for_archetype(archetype))?
    } else {
        serde_json::to_string_pretty(&ArchetypeConfig::preset(archetype))?
    };
    println!("{}", json);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
