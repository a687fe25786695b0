//! Musou Shooter headless demo
//!
//! Runs one session driven by the autopilot and logs how it went.
//! Set `RUST_LOG=debug` to follow spawns, kills and ability use.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use musou_shooter::Settings;
use musou_shooter::assets::{BuiltinAssets, SpriteSizes};
use musou_shooter::autopilot::Autopilot;
use musou_shooter::render::RecordingRenderer;
use musou_shooter::session::{FixedRateClock, SessionConfig, run_session};
use musou_shooter::sim::GameState;

#[derive(Parser, Debug)]
#[command(name = "musou-shooter")]
#[command(about = "Fixed-step arcade shooter simulation, played by an autopilot")]
struct Cli {
    /// Settings file (JSON); built-in defaults when omitted
    #[arg(long)]
    settings: Option<PathBuf>,
    /// RNG seed; derived from the clock when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many frames (60 s at 50 Hz by default)
    #[arg(long, default_value_t = 3_000)]
    max_frames: u64,
    /// Run as fast as possible instead of at the frame rate
    #[arg(long, default_value_t = false)]
    unpaced: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let assets = BuiltinAssets {
        sizes: settings.sprites,
    };
    settings.sprites = SpriteSizes {
        shield_thickness: settings.sprites.shield_thickness,
        ..SpriteSizes::resolve(&assets)
    };

    let seed = cli.seed.unwrap_or_else(seed_from_clock);
    log::info!("Musou Shooter (headless) starting with seed {seed}");

    let mut state = GameState::new(&settings, seed);
    let mut pilot = Autopilot::new();
    let mut renderer = RecordingRenderer::new();
    let mut clock = if cli.unpaced {
        FixedRateClock::unpaced()
    } else {
        FixedRateClock::new(settings.frame_rate)
    };
    let config = SessionConfig::from_settings(&settings).with_max_frames(cli.max_frames);

    let report = run_session(&mut state, &mut pilot, &mut renderer, &mut clock, config);

    log::info!(
        "{:?}: {} frames, score {}, {} frames presented",
        report.outcome,
        report.frames,
        report.score,
        renderer.frames_presented
    );
    println!(
        "outcome={:?} frames={} score={} seed={}",
        report.outcome, report.frames, report.score, seed
    );
    Ok(())
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
