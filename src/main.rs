//! Dodge Blocks native entry point
//!
//! Runs the game headless with the autopilot at the controls, for demos,
//! soak runs and tuning checks. A windowed frontend plugs into the same
//! `platform::run` loop through the `Frontend` trait.
//!
//! Usage:
//!   cargo run --release -- --sessions 5 --seed 42
//!   RUST_LOG=debug cargo run -- --config tuning.json --json

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use dodge_blocks::consts::DEFAULT_SEED;
use dodge_blocks::platform::{self, HeadlessFrontend};
use dodge_blocks::sim::GameState;
use dodge_blocks::{GameConfig, ScoringRule};

#[derive(Parser)]
#[command(name = "dodge-blocks")]
#[command(about = "Dodge falling blocks; the autopilot plays headless sessions")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON tuning file; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sessions to play before quitting
    #[arg(long, default_value_t = 3)]
    sessions: u32,

    /// End the whole run once any session reaches this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Override the scoring rule: dodged | survival
    #[arg(long, value_enum, ignore_case = true)]
    scoring: Option<ScoringRule>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(DEFAULT_SEED)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(scoring) = args.scoring {
        config.scoring = scoring;
    }
    if args.sessions == 0 {
        return Err(anyhow!("--sessions must be at least 1"));
    }

    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Dodge Blocks starting: {}x{} @ {} Hz, scoring by {}",
        config.screen.width,
        config.screen.height,
        config.screen.fps,
        config.scoring.as_str()
    );

    let mut frontend = HeadlessFrontend::new(config.sim_dt(), args.sessions, args.max_ticks);
    let mut state = GameState::new(config, seed);
    let summary = platform::run(&mut state, &mut frontend);

    if args.json {
        let json =
            serde_json::to_string_pretty(&summary).context("failed to serialize run summary")?;
        println!("{json}");
        return Ok(());
    }

    println!("=== RUN SUMMARY ===");
    println!("  Seed:     {:#x}", summary.seed);
    println!("  Ticks:    {}", summary.ticks);
    for record in &summary.sessions {
        println!(
            "  Session {}: score {} (level {}, {} ticks){}",
            record.session,
            record.score,
            record.level,
            record.ticks,
            if record.completed { "" } else { " [stopped]" }
        );
    }
    if let Some(best) = summary.high_scores.top_score() {
        println!("  Best:     {best}");
    }
    Ok(())
}
