//! smokewatch - windowed temperature anomaly monitoring
//!
//! One binary, two roles: `watch` runs a single-channel consumer process
//! and `publish` replays a CSV of readings onto the per-attribute queues.
//! Running `watch` once per channel plus one `publish` gives each channel
//! its own isolated process.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smokewatch_lib::Channel;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Smart-smoker temperature monitor
#[derive(Parser)]
#[command(name = "smokewatch")]
#[command(
    author,
    version,
    about = "Windowed temperature anomaly monitoring over durable queues",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch one channel's queue for temperature anomalies
    Watch {
        /// Channel to watch: smoker, food-a or food-b
        channel: Channel,
    },

    /// Read a CSV of readings and publish them to the queues
    Publish {
        /// Path to the CSV file (header row first)
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    let cli = Cli::parse();
    let config = config::MonitorConfig::load()?;

    match cli.command {
        Commands::Watch { channel } => commands::watch::run(channel, &config).await,
        Commands::Publish { file } => commands::publish::run(&file, &config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_watch_parses_channel() {
        let cli = Cli::try_parse_from(["smokewatch", "watch", "food-a"]).unwrap();
        match cli.command {
            Commands::Watch { channel } => assert_eq!(channel, Channel::FoodA),
            _ => panic!("expected watch command"),
        }
    }

    #[test]
    fn test_watch_rejects_unknown_channel() {
        assert!(Cli::try_parse_from(["smokewatch", "watch", "grill"]).is_err());
    }

    #[test]
    fn test_publish_parses_file() {
        let cli = Cli::try_parse_from(["smokewatch", "publish", "smoker-temps.csv"]).unwrap();
        match cli.command {
            Commands::Publish { file } => {
                assert_eq!(file, PathBuf::from("smoker-temps.csv"));
            }
            _ => panic!("expected publish command"),
        }
    }
}
