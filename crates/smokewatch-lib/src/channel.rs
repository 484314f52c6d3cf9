//! Monitored channels and their alert policies
//!
//! Three independent channels exist, one per monitored attribute of the
//! smoking process. Each carries its own durable queue, window capacity,
//! and threshold policy; nothing is shared between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Queue carrying smoker-chamber readings.
pub const SMOKER_QUEUE: &str = "01-smoker";
/// Queue carrying food A readings.
pub const FOOD_A_QUEUE: &str = "02-food-A";
/// Queue carrying food B readings.
pub const FOOD_B_QUEUE: &str = "03-food-B";

/// Smoker window: readings every 30 seconds for 2.5 minutes.
const SMOKER_WINDOW: usize = 5;
/// Food window: readings every 30 seconds for 10 minutes.
const FOOD_WINDOW: usize = 20;
/// Temperature drop (degrees F) that raises a smoker alert.
const SMOKER_ALERT_THRESHOLD: f64 = -15.0;
/// Maximum change (degrees F) that still counts as a food stall.
const FOOD_STALL_THRESHOLD: f64 = 1.0;

/// One monitored attribute of the smoking process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Smoker,
    FoodA,
    FoodB,
}

/// Threshold comparison applied to the window delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Alert when the delta falls to the (negative) threshold or below.
    DropBelow,
    /// Alert when the delta magnitude stays within the (positive) tolerance.
    MagnitudeBelow,
}

/// Static alert policy for one channel.
#[derive(Debug, Clone)]
pub struct ChannelPolicy {
    pub queue: &'static str,
    pub window_capacity: usize,
    pub threshold: f64,
    pub comparison: Comparison,
}

impl Channel {
    /// All monitored channels, in queue order.
    pub const ALL: [Channel; 3] = [Channel::Smoker, Channel::FoodA, Channel::FoodB];

    /// The alert policy for this channel.
    pub fn policy(&self) -> ChannelPolicy {
        match self {
            Channel::Smoker => ChannelPolicy {
                queue: SMOKER_QUEUE,
                window_capacity: SMOKER_WINDOW,
                threshold: SMOKER_ALERT_THRESHOLD,
                comparison: Comparison::DropBelow,
            },
            Channel::FoodA => ChannelPolicy {
                queue: FOOD_A_QUEUE,
                window_capacity: FOOD_WINDOW,
                threshold: FOOD_STALL_THRESHOLD,
                comparison: Comparison::MagnitudeBelow,
            },
            Channel::FoodB => ChannelPolicy {
                queue: FOOD_B_QUEUE,
                window_capacity: FOOD_WINDOW,
                threshold: FOOD_STALL_THRESHOLD,
                comparison: Comparison::MagnitudeBelow,
            },
        }
    }

    /// Queue this channel's readings travel on.
    pub fn queue(&self) -> &'static str {
        self.policy().queue
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Smoker => write!(f, "smoker"),
            Channel::FoodA => write!(f, "food-a"),
            Channel::FoodB => write!(f, "food-b"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smoker" => Ok(Channel::Smoker),
            "food-a" | "food_a" | "fooda" => Ok(Channel::FoodA),
            "food-b" | "food_b" | "foodb" => Ok(Channel::FoodB),
            other => Err(format!(
                "unknown channel {other:?}, expected smoker, food-a or food-b"
            )),
        }
    }
}
