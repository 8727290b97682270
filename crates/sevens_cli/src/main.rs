//! Sevens CLI
//!
//! Headless seven-a-side matches from the command line.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sevens_core::engine::match_state::format_clock;
use sevens_core::engine::snapshot::{MatchSnapshot, PitchSpec, RenderAdapter, ReplayRecorder};
use sevens_core::engine::rng::SeededRandom;
use sevens_core::{request_schema_json, EngineConfig, MatchEngine, MatchEvent, Team, TickStatus};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sevens")]
#[command(about = "Run seven-a-side match simulations", long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct EngineArgs {
    /// Config preset: realistic, arcade or quick
    #[arg(long, default_value = "realistic")]
    preset: String,

    /// YAML or JSON config file; takes precedence over --preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Match length in seconds
    #[arg(short, long)]
    duration: Option<f32>,

    /// Simulation steps per second
    #[arg(long, default_value = "60")]
    fps: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match and print the final report
    Simulate {
        /// Fixed seed; a fresh entropy seed is drawn when omitted
        #[arg(short, long)]
        seed: Option<u64>,

        #[command(flatten)]
        engine: EngineArgs,

        /// Print the scoreboard every ten match seconds
        #[arg(long)]
        watch: bool,

        /// Print the event log
        #[arg(long)]
        events: bool,

        /// Write a replay of every Nth frame to this JSON file
        #[arg(long)]
        replay: Option<PathBuf>,

        #[arg(long, default_value = "6")]
        record_every: u32,

        /// Print the final statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a range of seeds and summarise the results
    Batch {
        #[arg(long, default_value = "1")]
        start_seed: u64,

        #[arg(short, long, default_value = "20")]
        count: u64,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Print a config preset as YAML
    Config {
        #[arg(long, default_value = "realistic")]
        preset: String,
    },

    /// Print the JSON Schema of the match request
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Simulate { seed, engine, watch, events, replay, record_every, json } => {
            simulate(seed, &engine, watch, events, replay, record_every, json)
        }
        Commands::Batch { start_seed, count, engine } => batch(start_seed, count, &engine),
        Commands::Config { preset } => {
            let config = EngineConfig::preset(&preset)
                .with_context(|| format!("unknown preset '{}'", preset))?;
            print!("{}", config.to_yaml_string()?);
            Ok(())
        }
        Commands::Schema => {
            println!("{}", request_schema_json()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

fn load_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::preset(&args.preset)
            .with_context(|| format!("unknown preset '{}'", args.preset))?,
    };
    if let Some(seconds) = args.duration {
        config.rules.duration_seconds = seconds;
    }
    config.validate()?;
    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }
    Ok(config)
}

/// Prints the clock and score whenever another ten match seconds have passed
struct Scoreboard {
    next_report: f32,
}

impl RenderAdapter for Scoreboard {
    fn sync(&mut self, snapshot: &MatchSnapshot) {
        if snapshot.elapsed < self.next_report {
            return;
        }
        self.next_report += 10.0;
        let carrier = snapshot.carrier().map(|p| p.label.as_str()).unwrap_or("-");
        println!(
            "{:>5}  {}  ball: {:?} ({})",
            snapshot.clock,
            snapshot.state.score_line(),
            snapshot.ball.state,
            carrier
        );
    }
}

/// Scoreboard and replay recorder fed from the same frames
struct Fanout<'a> {
    adapters: Vec<&'a mut dyn RenderAdapter>,
}

impl RenderAdapter for Fanout<'_> {
    fn sync(&mut self, snapshot: &MatchSnapshot) {
        for adapter in self.adapters.iter_mut() {
            adapter.sync(snapshot);
        }
    }
}

fn simulate(
    seed: Option<u64>,
    args: &EngineArgs,
    watch: bool,
    events: bool,
    replay: Option<PathBuf>,
    record_every: u32,
    json: bool,
) -> Result<()> {
    let config = load_config(args)?;
    let step_ms = 1000.0 / args.fps as f32;
    let pitch = PitchSpec { width: config.field.width, height: config.field.height };
    info!(?seed, duration = config.rules.duration_seconds, "kick off");

    let mut engine = match seed {
        Some(seed) => MatchEngine::seeded(config, seed),
        None => MatchEngine::new(config, SeededRandom::from_entropy()),
    };
    let mut scoreboard = Scoreboard { next_report: 0.0 };
    let mut recorder = replay.as_ref().map(|_| ReplayRecorder::new(pitch, record_every));

    loop {
        let mut adapters: Vec<&mut dyn RenderAdapter> = Vec::new();
        if watch {
            adapters.push(&mut scoreboard);
        }
        if let Some(recorder) = recorder.as_mut() {
            adapters.push(recorder);
        }
        let status = if adapters.is_empty() {
            engine.tick(step_ms)
        } else {
            engine.tick_and_sync(step_ms, &mut Fanout { adapters })
        };

        match status {
            TickStatus::GoalScored(team) => {
                let clock = format_clock(engine.state().time_remaining);
                info!(team = %team, score = %engine.state().score_line(), %clock, "GOAL");
            }
            TickStatus::FullTime | TickStatus::Finished => break,
            TickStatus::Running | TickStatus::Paused => {}
        }
    }

    if let (Some(path), Some(recorder)) = (replay, recorder) {
        recorder
            .write_json(&path)
            .with_context(|| format!("Failed to write replay {}", path.display()))?;
        info!(frames = recorder.len(), path = %path.display(), "replay written");
    }

    let stats = engine.final_stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", stats.report());
    }
    if events {
        for event in engine.events() {
            println!("{}", describe(event));
        }
    }
    Ok(())
}

fn describe(event: &MatchEvent) -> String {
    let kind = serde_json::to_string(&event.kind).unwrap_or_default();
    format!("[{}] {}", format_clock(event.at), kind)
}

fn batch(start_seed: u64, count: u64, args: &EngineArgs) -> Result<()> {
    let config = load_config(args)?;
    let step_ms = 1000.0 / args.fps as f32;
    let (mut home_wins, mut away_wins, mut draws) = (0u64, 0u64, 0u64);
    let (mut goals, mut shots, mut passes) = (0u64, 0u64, 0u64);

    for seed in start_seed..start_seed.saturating_add(count) {
        let mut engine = MatchEngine::seeded(config.clone(), seed);
        while !engine.is_over() {
            engine.tick(step_ms);
        }
        let stats = engine.final_stats();
        debug!(seed, score = %engine.state().score_line(), "batch match done");
        match stats.winner() {
            Some(Team::Home) => home_wins += 1,
            Some(Team::Away) => away_wins += 1,
            None => draws += 1,
        }
        goals += u64::from(stats.home.score + stats.away.score);
        shots += u64::from(stats.home.shots + stats.away.shots);
        passes += u64::from(stats.home.passes + stats.away.passes);
    }

    let played = count.max(1) as f64;
    println!("matches:   {}", count);
    println!("home/draw/away: {}/{}/{}", home_wins, draws, away_wins);
    println!("goals per match:  {:.2}", goals as f64 / played);
    println!("shots per match:  {:.2}", shots as f64 / played);
    println!("passes per match: {:.2}", passes as f64 / played);
    Ok(())
}
