use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use spike_snake::logging;
use spike_snake::modes::PlayMode;
use spike_snake::settings::{LogLevel, Settings};

#[derive(Parser)]
#[command(name = "spike_snake")]
#[command(version, about = "Snake where the walls close in if you dawdle")]
struct Cli {
    /// Frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "spike_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings {
        fps: cli.fps,
        seed: cli.seed,
        log_file: cli.log_file,
        log_level: cli.log_level,
    };

    logging::init(&settings.log_file, settings.log_level.to_level_filter())?;
    info!("Starting spike_snake with {settings:?}");

    let mut play_mode = PlayMode::new(settings);
    play_mode.run().await?;

    Ok(())
}
