use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use fantasy_fighter::assets::FileAssets;
use fantasy_fighter::controller::{FixedRateClock, SessionController};
use fantasy_fighter::display::terminal::{self, TerminalRenderer};
use fantasy_fighter::input::TerminalInput;
use fantasy_fighter::GameConfig;

/// Fantasy Fighter: dodge and shoot the falling enemies.
///
/// Arrows / WASD move, SPACE fires (and restarts after a loss), ESC or Q quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding the built-in tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding `<name>.txt` sprite art.
    #[arg(long, default_value = "images")]
    assets: PathBuf,

    /// Seed for enemy spawning, for reproducible rounds.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG, default `info`). The terminal
    /// itself is taken by the game, so without this nothing is logged.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let assets = FileAssets::new(cli.assets.clone());
    tracing::info!(assets = %assets.dir().display(), seed = ?cli.seed, "starting");

    let mut out = BufWriter::new(stdout());
    let keyboard_enhanced = terminal::enter(&mut out).context("preparing terminal")?;

    let result = run(&mut out, config, rng, &assets);

    // Always restore the terminal
    terminal::leave(&mut out, keyboard_enhanced);
    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}

fn run(
    out: &mut BufWriter<std::io::Stdout>,
    config: GameConfig,
    rng: StdRng,
    assets: &FileAssets,
) -> anyhow::Result<()> {
    let mut renderer = TerminalRenderer::new(out, &config).context("querying terminal size")?;
    let mut input = TerminalInput::spawn();
    let mut clock = FixedRateClock::new();
    let mut controller = SessionController::new(config, rng);
    controller.run(&mut input, &mut renderer, assets, &mut clock)
}
