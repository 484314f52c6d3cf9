//! Threshold evaluation over a channel's window

use crate::channel::{Channel, ChannelPolicy, Comparison};
use crate::error::StateError;
use crate::models::AlertEvent;
use crate::window::SlidingWindow;

/// Applies a channel's threshold policy to its sliding window.
pub struct AnomalyDetector {
    channel: Channel,
    policy: ChannelPolicy,
}

impl AnomalyDetector {
    /// Create a detector bound to a channel's static policy.
    pub fn for_channel(channel: Channel) -> Self {
        Self {
            channel,
            policy: channel.policy(),
        }
    }

    /// The policy this detector evaluates.
    pub fn policy(&self) -> &ChannelPolicy {
        &self.policy
    }

    /// Evaluate the window after a reading was inserted.
    ///
    /// Returns `Ok(None)` until the window is full: the first
    /// `capacity - 1` readings of any run never produce an alert. Nothing
    /// is deduplicated across evaluations — a condition that persists
    /// produces one event per qualifying reading. The window is not
    /// mutated.
    ///
    /// `StateError` cannot occur while gating holds; it propagates as a
    /// defect rather than being handled here.
    pub fn evaluate(
        &self,
        window: &SlidingWindow,
        timestamp: &str,
    ) -> Result<Option<AlertEvent>, StateError> {
        if !window.is_full() {
            return Ok(None);
        }

        let delta = round_tenths(window.newest()? - window.oldest()?);
        let triggered = match self.policy.comparison {
            Comparison::DropBelow => delta <= self.policy.threshold,
            Comparison::MagnitudeBelow => delta.abs() <= self.policy.threshold,
        };

        Ok(triggered.then(|| AlertEvent {
            timestamp: timestamp.to_string(),
            delta,
            channel: self.channel,
        }))
    }
}

/// Round to one decimal place, ties to even.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
