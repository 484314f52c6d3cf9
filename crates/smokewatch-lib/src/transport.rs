//! AMQP transport boundary
//!
//! Wraps the lapin client with the queue semantics the pipeline relies on:
//! durable queues, manual acknowledgment, a prefetch of one unacknowledged
//! message per consumer, and persistent publishes. Everything above this
//! module is broker-agnostic.

use lapin::options::{
    BasicConsumeOptions, BasicPublishOptions, BasicQosOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel as AmqpChannel, Connection, ConnectionProperties, Consumer};

use crate::error::TransportError;

/// AMQP delivery mode marking a message persistent on a durable queue.
const PERSISTENT: u8 = 2;

/// Reply code sent with a clean connection close.
const REPLY_SUCCESS: u16 = 200;

/// Connection settings for the AMQP broker.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5672,
        }
    }
}

impl BrokerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// AMQP URI for this broker, default vhost.
    pub fn uri(&self) -> String {
        format!("amqp://{}:{}/%2f", self.host, self.port)
    }
}

/// An open broker connection and one AMQP channel on it.
pub struct Transport {
    connection: Connection,
    channel: AmqpChannel,
    host: String,
}

impl Transport {
    /// Connect to the broker and open a channel.
    ///
    /// Failure here is fatal: there is no retry policy, and callers exit
    /// non-zero.
    pub async fn connect(config: &BrokerConfig) -> Result<Self, TransportError> {
        let connection = Connection::connect(&config.uri(), ConnectionProperties::default())
            .await
            .map_err(|source| TransportError::Connection {
                host: config.host.clone(),
                source,
            })?;
        let channel =
            connection
                .create_channel()
                .await
                .map_err(|source| TransportError::Connection {
                    host: config.host.clone(),
                    source,
                })?;
        Ok(Self {
            connection,
            channel,
            host: config.host.clone(),
        })
    }

    /// Broker host this transport is connected to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Declare a durable queue (idempotent; survives a broker restart).
    pub async fn declare_durable_queue(&self, queue: &str) -> Result<(), TransportError> {
        let options = QueueDeclareOptions {
            durable: true,
            ..QueueDeclareOptions::default()
        };
        self.channel
            .queue_declare(queue, options, FieldTable::default())
            .await
            .map_err(|source| TransportError::QueueSetup {
                queue: queue.to_string(),
                source,
            })?;
        Ok(())
    }

    /// Limit delivery to one unacknowledged message per consumer.
    ///
    /// With a prefetch of one, deliveries on a queue are processed strictly
    /// in publish order; the window's eviction order then matches the true
    /// temporal order of readings.
    pub async fn set_prefetch_one(&self) -> Result<(), TransportError> {
        self.channel
            .basic_qos(1, BasicQosOptions::default())
            .await
            .map_err(|source| TransportError::Qos { source })
    }

    /// Start a manual-ack consumer on the queue.
    pub async fn consume(&self, queue: &str, tag: &str) -> Result<Consumer, TransportError> {
        // Default options leave no_ack off: the loop acknowledges each
        // delivery itself once its effects are committed.
        self.channel
            .basic_consume(
                queue,
                tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|source| TransportError::Consume {
                queue: queue.to_string(),
                source,
            })
    }

    /// Publish a persistent message to a queue via the default exchange.
    pub async fn publish_persistent(
        &self,
        queue: &str,
        payload: &str,
    ) -> Result<(), TransportError> {
        let confirm = self
            .channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions::default(),
                payload.as_bytes(),
                BasicProperties::default().with_delivery_mode(PERSISTENT),
            )
            .await
            .map_err(|source| TransportError::Publish {
                queue: queue.to_string(),
                source,
            })?;
        confirm.await.map_err(|source| TransportError::Publish {
            queue: queue.to_string(),
            source,
        })?;
        Ok(())
    }

    /// Close the connection cleanly.
    pub async fn close(self) -> Result<(), TransportError> {
        self.connection
            .close(REPLY_SUCCESS, "Goodbye")
            .await
            .map_err(|source| TransportError::Connection {
                host: self.host.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_broker_config() {
        let config = BrokerConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5672);
    }

    #[test]
    fn test_uri_targets_default_vhost() {
        let config = BrokerConfig::new("rabbit.internal", 5673);
        assert_eq!(config.uri(), "amqp://rabbit.internal:5673/%2f");
    }
}
