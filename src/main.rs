//! gamedelay demo entry point.
//!
//! Runs a headless frame loop over a `bevy_ecs` world where a few entities
//! schedule delayed callbacks: a one-shot, a repeating one with a completion
//! callback, and an endless one canceled by another delay. A pause window in
//! the middle of the run shows due times being pushed back.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --run-ms 3000 --fps 60
//! RUST_LOG=debug cargo run -- --realtime
//! ```
//!
//! Settings come from `./delay.ini` (see
//! [`DemoConfig`](gamedelay::resources::democonfig::DemoConfig)); command-line
//! flags override them.

use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use gamedelay::game::{FireLog, run_frames, setup_world, sleep_frame, spawn_demo_entities};
use gamedelay::resources::clock::{ManualTimeSource, SystemTimeSource};
use gamedelay::resources::democonfig::DemoConfig;

/// Delayed callbacks on ECS entities, with a pause window.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// INI file with [clock] and [demo] sections (default: ./delay.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// How long to run, in milliseconds of loop time.
    #[arg(long, value_name = "MS")]
    run_ms: Option<u64>,

    /// Frames per second of the loop.
    #[arg(long)]
    fps: Option<u32>,

    /// Use the system clock and sleep between frames.
    #[arg(long)]
    realtime: bool,

    /// Seed for the spawner interval jitter.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Write the effective settings back to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => DemoConfig::with_path(path),
        None => DemoConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(run_ms) = cli.run_ms {
        config.run_ms = run_ms;
    }
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
    }
    if cli.realtime {
        config.realtime = true;
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let (report, fired) = if config.realtime {
        let mut world = setup_world(SystemTimeSource);
        spawn_demo_entities(&mut world, cli.seed);
        let report = run_frames(&mut world, &config, sleep_frame);
        (report, world.resource::<FireLog>().lines.len())
    } else {
        let time = ManualTimeSource::new(0);
        let mut world = setup_world(time.clone());
        spawn_demo_entities(&mut world, cli.seed);
        let report = run_frames(&mut world, &config, |ms| time.advance(ms));
        (report, world.resource::<FireLog>().lines.len())
    };

    info!(
        "Done: {} frames, {} ticks, {} callbacks fired",
        report.frames, report.ticks, fired
    );
}
