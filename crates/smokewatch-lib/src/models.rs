//! Core data models for the monitoring pipeline

use serde::{Deserialize, Serialize};

use crate::channel::Channel;

/// A single temperature reading parsed from a raw message.
///
/// The timestamp is opaque and format-preserved from the wire. A reading is
/// consumed once by the detector and never persisted beyond the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: String,
    pub temperature: f64,
}

/// An alert derived from a full window crossing its channel threshold.
///
/// Emitted transiently to the structured log; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    /// Timestamp of the newest reading in the triggering window.
    pub timestamp: String,
    /// Temperature change across the window, rounded to one decimal place.
    pub delta: f64,
    /// Channel that raised the alert.
    pub channel: Channel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_event_serializes_channel_as_kebab_case() {
        let alert = AlertEvent {
            timestamp: "07/08/2026 10:30:00".to_string(),
            delta: -17.0,
            channel: Channel::FoodA,
        };

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["channel"], "food-a");
        assert_eq!(json["delta"], -17.0);
        assert_eq!(json["timestamp"], "07/08/2026 10:30:00");
    }

    #[test]
    fn test_reading_round_trips_through_json() {
        let reading = Reading {
            timestamp: "07/08/2026 10:30:00".to_string(),
            temperature: 165.5,
        };

        let json = serde_json::to_string(&reading).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }
}
