mod bot;
mod report;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{Game, RunPhase, SimConfig};
use report::RunReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Plays one seeded run with a scripted player and reports how it went.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Frames to simulate before stopping, unless the player dies first
    #[arg(short, long, default_value_t = 36_000)]
    frames: u32,
    /// Fixed frame rate used to derive the per-frame delta
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Optional TOML file overriding the simulation config
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive, got {}", args.fps);

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => SimConfig::default(),
    };
    let mut game =
        Game::new(args.seed, config).context("Failed to generate the first floor")?;
    let dt = 1.0 / args.fps;

    let mut report = RunReport::new(args.seed);
    report.absorb(&game.drain_log());
    for _ in 0..args.frames {
        let input = bot::decide(&game);
        report.record_step(game.step(dt, &input));
        report.absorb(&game.drain_log());
        if game.phase() == RunPhase::Dead {
            break;
        }
    }
    report.finish(&game);
    info!(floor = report.deepest_floor, kills = report.kills, "simulation finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.text_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
