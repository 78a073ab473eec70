use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::PlayMode;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Single-screen snake game for the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_length: Option<usize>,

    /// Milliseconds per snake move
    #[arg(long)]
    move_interval_ms: Option<u64>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal belongs to the game
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_length) = self.grid_length {
            config.grid_length = grid_length;
        }
        if let Some(move_interval_ms) = self.move_interval_ms {
            config.move_interval_ms = move_interval_ms;
        }

        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!("configuration: {:?}", config);

    let mut play_mode = PlayMode::new(config, cli.seed);
    play_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["grid_snake", "--grid-length", "20", "--move-interval-ms", "150"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_length, 20);
        assert_eq!(config.move_interval_ms, 150);
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        let cli = Cli::parse_from(["grid_snake", "--grid-length", "1"]);
        assert!(cli.game_config().is_err());
    }
}
