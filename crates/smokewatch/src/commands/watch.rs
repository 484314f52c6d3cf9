//! The `watch` subcommand: one consumer process per channel

use anyhow::Result;
use smokewatch_lib::consumer::ChannelConsumer;
use smokewatch_lib::transport::Transport;
use smokewatch_lib::Channel;
use tracing::info;

use crate::config::MonitorConfig;

/// Run the consumer loop for one channel until cancelled.
///
/// Connection failure is fatal and exits non-zero; a clean operator
/// interrupt closes the connection and exits zero.
pub async fn run(channel: Channel, config: &MonitorConfig) -> Result<()> {
    info!(channel = %channel, host = %config.host, "Starting watcher");

    let transport = Transport::connect(&config.broker()).await?;

    let mut consumer = ChannelConsumer::new(channel);
    consumer.run(&transport).await?;

    transport.close().await?;
    Ok(())
}
