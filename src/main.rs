use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tile_snake::game::GameConfig;
use tile_snake::logging::init_file_logging;
use tile_snake::modes::{HumanMode, HumanOptions};
use tile_snake::notify::{Notifier, SilentNotifier, TerminalBell};
use tile_snake::store::JsonFileStore;

#[derive(Parser)]
#[command(name = "tile_snake")]
#[command(version, about = "Grid snake with wraparound edges and a persistent high score")]
struct Cli {
    /// Grid width in tiles (fits the terminal when neither size is given)
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// JSON game config; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    base_tick_ms: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = ".tile_snake_scores.json")]
    high_score_file: PathBuf,

    /// Log file (filter with RUST_LOG)
    #[arg(long, default_value = "tile_snake.log")]
    log_file: PathBuf,

    /// Do not ring the terminal bell on a new high score
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_file_logging(&cli.log_file)?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(base_tick_ms) = cli.base_tick_ms {
        config.base_tick_ms = base_tick_ms;
    }
    config.validate().context("Invalid game configuration")?;

    let options = HumanOptions {
        fit_to_terminal: cli.width.is_none() && cli.height.is_none() && cli.config.is_none(),
    };

    let store = Box::new(JsonFileStore::new(cli.high_score_file));
    let notifier: Box<dyn Notifier> = if cli.quiet {
        Box::new(SilentNotifier)
    } else {
        Box::new(TerminalBell)
    };

    let mut human_mode = HumanMode::new(config, options, store, notifier)?;
    human_mode.run().await?;

    Ok(())
}
