//! sortvis CLI
//!
//! Animates bubble sort and quick sort as a terminal bar chart.
//!
//! Usage:
//!   sortvis run [--config sortvis.toml] [--algorithm quick] [--speed 4]
//!   sortvis init [dir]

mod config;
mod terminal;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sortvis_core::{
    AlgorithmKind, PlaybackConfig, PlaybackController, PlaybackState, VisualizerConfig,
};
use tracing_subscriber::EnvFilter;

use crate::config::Overrides;
use crate::terminal::TerminalRenderer;

#[derive(Parser)]
#[command(name = "sortvis")]
#[command(author, version, about = "Step-by-step sorting visualizer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort random data and draw every step
    Run(RunArgs),

    /// Write a default sortvis.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Config file or directory containing sortvis.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Algorithm ("bubble", "quick", "Bubble Sort", ...)
    #[arg(short, long)]
    algorithm: Option<AlgorithmKind>,

    /// Speed multiplier
    #[arg(short, long)]
    speed: Option<f64>,

    /// Number of bars
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Smallest generated value
    #[arg(long)]
    min: Option<u32>,

    /// Largest generated value
    #[arg(long)]
    max: Option<u32>,

    /// Seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,

    /// Pause after this many steps, then continue
    #[arg(long)]
    pause_after: Option<u64>,

    /// Disable colored bars
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("sortvis=debug,sortvis_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Init { path, force } => config::init(&path, force),
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => config::load(path)?,
        None => VisualizerConfig::default(),
    };
    let overrides = Overrides {
        algorithm: args.algorithm,
        speed: args.speed,
        array_size: args.size,
        min: args.min,
        max: args.max,
    };
    let config = config::apply(base, &overrides)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let data = sortvis_core::generate_data(&config.data, &mut rng)?;

    let color = !args.no_color && io::stdout().is_terminal();
    let renderer = Arc::new(TerminalRenderer::new(io::stdout(), config.algorithm, color));
    let mut controller =
        PlaybackController::new(data, renderer.clone(), PlaybackConfig::from(&config));

    controller.start(config.algorithm, config.speed)?;

    if let Some(limit) = args.pause_after {
        while renderer.steps() < limit && controller.state() == PlaybackState::Running {
            thread::sleep(Duration::from_millis(1));
        }
        if controller.state() == PlaybackState::Running {
            controller.pause()?;
            tracing::info!("Paused after {} steps", renderer.steps());
            continue_session(&mut controller, config.algorithm, config.speed)?;
        }
    }

    let state = controller.wait().context("Playback failed")?;
    tracing::debug!("Session ended in {:?}", state);
    Ok(())
}

/// Resume a paused session, or start over when the algorithm cannot resume.
fn continue_session(
    controller: &mut PlaybackController,
    kind: AlgorithmKind,
    speed: f64,
) -> Result<()> {
    if kind.supports_resume() {
        controller.resume()?;
    } else {
        tracing::warn!("{} cannot resume; starting over from the current data", kind);
        controller.restart(kind, speed)?;
    }
    Ok(())
}
