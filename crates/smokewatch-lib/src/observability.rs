//! Structured event logging for the monitoring pipeline
//!
//! All alerts and failures surface through the log stream; there is no
//! separate user-facing error channel. Operators observe process logs and
//! exit status.

use tracing::{error, info, warn};

use crate::channel::Comparison;
use crate::error::ParseError;
use crate::models::AlertEvent;

/// Structured logger for watcher and distributor events.
///
/// Emits consistent `event = "..."` fields so the JSON log stream can be
/// filtered per event kind.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    component: String,
}

impl StructuredLogger {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// Log a received raw payload.
    pub fn log_received(&self, queue: &str, payload: &str) {
        info!(
            event = "message_received",
            component = %self.component,
            queue = %queue,
            payload = %payload,
            "Received message"
        );
    }

    /// Log a raised temperature alert.
    pub fn log_alert(&self, alert: &AlertEvent) {
        let kind = match alert.channel.policy().comparison {
            Comparison::DropBelow => "drop",
            Comparison::MagnitudeBelow => "stall",
        };
        warn!(
            event = "temperature_alert",
            component = %self.component,
            channel = %alert.channel,
            kind = %kind,
            timestamp = %alert.timestamp,
            delta = alert.delta,
            "Temperature alert raised"
        );
    }

    /// Log a per-message parse failure (the message is still acknowledged).
    pub fn log_parse_failure(&self, queue: &str, error: &ParseError) {
        error!(
            event = "parse_failure",
            component = %self.component,
            queue = %queue,
            error = %error,
            "Failed to parse message"
        );
    }

    /// Log a published message.
    pub fn log_published(&self, queue: &str, payload: &str) {
        info!(
            event = "message_published",
            component = %self.component,
            queue = %queue,
            payload = %payload,
            "Sent message"
        );
    }

    /// Log a watcher entering its consume loop.
    pub fn log_startup(&self, queue: &str) {
        info!(
            event = "watcher_started",
            component = %self.component,
            queue = %queue,
            "Waiting for temperature messages, press CTRL+C to exit"
        );
    }

    /// Log a clean shutdown.
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "shutdown",
            component = %self.component,
            reason = %reason,
            "Closing connection"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_construction() {
        let logger = StructuredLogger::new("watch-smoker");
        assert_eq!(logger.component, "watch-smoker");
    }
}
