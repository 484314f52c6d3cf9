//! The `publish` subcommand: replay a CSV of readings onto the queues

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use smokewatch_lib::producer::ReadingDistributor;
use smokewatch_lib::transport::Transport;
use smokewatch_lib::Channel;
use tracing::info;

use crate::config::MonitorConfig;

/// Publish every record in the file at the configured cadence, then exit.
pub async fn run(file: &Path, config: &MonitorConfig) -> Result<()> {
    let source = File::open(file)
        .with_context(|| format!("failed to open record source {}", file.display()))?;

    info!(file = %file.display(), host = %config.host, "Starting distributor");

    let transport = Transport::connect(&config.broker()).await?;

    // Declare every destination up front so publishes land on durable
    // queues even before any watcher has started.
    for channel in Channel::ALL {
        transport.declare_durable_queue(channel.queue()).await?;
    }

    let distributor = ReadingDistributor::new(transport, config.cadence());
    distributor.run(BufReader::new(source)).await?;

    distributor.into_publisher().close().await?;
    Ok(())
}
