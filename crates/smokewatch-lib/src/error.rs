//! Error types for the monitoring pipeline

use thiserror::Error;

/// Errors raised while parsing a raw message payload.
///
/// Parse failures are recoverable per-message: the consumer logs the
/// failure, acknowledges the message anyway, and continues the loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Payload does not match `Temperature at <timestamp> is <value>`.
    #[error("malformed payload: expected `Temperature at <timestamp> is <value>`")]
    Malformed,

    /// The temperature fragment is not a base-10 decimal number.
    #[error("non-numeric temperature: {0:?}")]
    NonNumeric(String),
}

/// Fatal failures at the AMQP boundary.
///
/// There is no reconnect policy: any transport failure exits the process
/// non-zero and the watcher is restarted externally.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connecting to the broker failed.
    #[error("connection to AMQP broker at {host} failed: {source}")]
    Connection {
        host: String,
        #[source]
        source: lapin::Error,
    },

    /// Declaring a durable queue failed.
    #[error("declaring queue {queue} failed: {source}")]
    QueueSetup {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    /// Configuring per-consumer flow control failed.
    #[error("channel QoS configuration failed: {source}")]
    Qos {
        #[source]
        source: lapin::Error,
    },

    /// Consuming a delivery from a queue failed.
    #[error("consuming from queue {queue} failed: {source}")]
    Consume {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    /// Publishing a message to a queue failed.
    #[error("publish to queue {queue} failed: {source}")]
    Publish {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    /// Acknowledging a delivery failed.
    #[error("acknowledging delivery on queue {queue} failed: {source}")]
    Ack {
        queue: String,
        #[source]
        source: lapin::Error,
    },
}

/// Fatal failures reading the input record source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The record source could not be read.
    #[error("failed to read record source: {0}")]
    Io(#[from] std::io::Error),

    /// A record line did not have the expected field count.
    #[error("record on line {line} has {found} fields, expected {expected}")]
    FieldCount {
        line: usize,
        found: usize,
        expected: usize,
    },
}

/// Programming errors in window access.
///
/// Unreachable while evaluation is gated on a full window; if one surfaces
/// it is a defect and propagates rather than being handled.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// `oldest`/`newest` were queried on an empty window.
    #[error("window is empty")]
    EmptyWindow,
}
