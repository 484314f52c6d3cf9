//! Per-channel consumer loop
//!
//! Each watcher owns exactly one channel: it declares the durable queue,
//! limits delivery to one unacknowledged message, and runs an explicit
//! receive-process-acknowledge cycle until cancelled. The window lives in
//! the loop instance and is never shared across channels or tasks.

use futures_util::StreamExt;
use lapin::options::BasicAckOptions;

use crate::anomaly::AnomalyDetector;
use crate::channel::Channel;
use crate::error::{ParseError, StateError, TransportError};
use crate::models::AlertEvent;
use crate::observability::StructuredLogger;
use crate::parser;
use crate::transport::Transport;
use crate::window::SlidingWindow;

/// Outcome of processing one delivery payload.
///
/// The delivery is acknowledged in either case: an unparseable payload must
/// not be redelivered forever.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Reading accepted; an alert may have been raised.
    Processed(Option<AlertEvent>),
    /// Payload rejected by the parser.
    Rejected(ParseError),
}

/// Consumer loop state for one monitored channel.
pub struct ChannelConsumer {
    channel: Channel,
    detector: AnomalyDetector,
    window: SlidingWindow,
    logger: StructuredLogger,
}

impl ChannelConsumer {
    /// Create a consumer with an empty window for the channel.
    ///
    /// A restarted watcher starts from an empty window, so its first
    /// `capacity - 1` readings produce no alert evaluation.
    pub fn new(channel: Channel) -> Self {
        let detector = AnomalyDetector::for_channel(channel);
        let window = SlidingWindow::new(detector.policy().window_capacity);
        Self {
            channel,
            detector,
            window,
            logger: StructuredLogger::new(format!("watch-{channel}")),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Number of readings currently buffered.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Process one raw payload: parse, push, evaluate, log.
    ///
    /// Returns the per-message outcome; the caller acknowledges the
    /// delivery in either case. A `StateError` cannot occur while
    /// evaluation is gated on a full window and propagates as a defect.
    pub fn handle_payload(&mut self, payload: &str) -> Result<Outcome, StateError> {
        let queue = self.channel.queue();
        self.logger.log_received(queue, payload);

        let reading = match parser::parse_reading(payload) {
            Ok(reading) => reading,
            Err(error) => {
                self.logger.log_parse_failure(queue, &error);
                return Ok(Outcome::Rejected(error));
            }
        };

        self.window.push(reading.temperature);
        let alert = self.detector.evaluate(&self.window, &reading.timestamp)?;
        if let Some(alert) = &alert {
            self.logger.log_alert(alert);
        }
        Ok(Outcome::Processed(alert))
    }

    /// Consume the channel's queue until the broker fails or the watcher
    /// is cancelled.
    ///
    /// Cancellation is observed at the top of the loop only: an in-flight
    /// delivery always completes its acknowledge step before teardown.
    /// Transport failures are fatal; the caller exits non-zero.
    pub async fn run(&mut self, transport: &Transport) -> anyhow::Result<()> {
        let queue = self.channel.queue();

        transport.declare_durable_queue(queue).await?;
        transport.set_prefetch_one().await?;
        let mut deliveries = transport
            .consume(queue, &format!("smokewatch-{}", self.channel))
            .await?;

        self.logger.log_startup(queue);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    self.logger.log_shutdown("operator interrupt");
                    break;
                }
                delivery = deliveries.next() => {
                    let Some(delivery) = delivery else {
                        anyhow::bail!("consumer stream on queue {queue} closed unexpectedly");
                    };
                    let delivery = delivery.map_err(|source| TransportError::Consume {
                        queue: queue.to_string(),
                        source,
                    })?;

                    let payload = String::from_utf8_lossy(&delivery.data).into_owned();
                    self.handle_payload(&payload)?;

                    delivery
                        .ack(BasicAckOptions::default())
                        .await
                        .map_err(|source| TransportError::Ack {
                            queue: queue.to_string(),
                            source,
                        })?;
                }
            }
        }
        Ok(())
    }
}
