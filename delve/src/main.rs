//! Delve: a roguelike in the terminal.

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use delve::{DelveModel, GameConfig};
use delve_core::app::{App, AppConfig};
use delve_crossterm::CrosstermDriver;

/// Explore a randomly generated dungeon.
#[derive(Parser, Debug)]
#[command(name = "delve", version, about, long_about = None)]
struct Cli {
    /// Seed for dungeon generation (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Sight radius in tiles; 0 sees the whole map.
    #[arg(long, default_value_t = 8)]
    fov_radius: i32,

    /// Write logs to this file. The terminal is taken over by the game, so
    /// without it only errors are reported, after the screen is restored.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let default = if log_file.is_some() { "info" } else { "error" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default));
    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.try_init()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = GameConfig::default().with_fov_radius(cli.fov_radius);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    log::info!("fov radius {}", config.fov_radius);

    let (width, height) = (config.screen_width, config.screen_height);
    let model = DelveModel::seeded(config);
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        width,
        height,
    });
    app.run()?;
    log::info!("bye");
    Ok(())
}
