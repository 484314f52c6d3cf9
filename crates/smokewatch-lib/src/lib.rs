//! Core library for the smokewatch temperature monitor
//!
//! This crate provides the core functionality for:
//! - Parsing temperature readings off the wire
//! - Per-channel sliding-window buffering
//! - Anomaly detection (drop and stall alerts)
//! - Durable queue consumption and publishing over AMQP
//! - Structured event logging

pub mod anomaly;
pub mod channel;
pub mod consumer;
pub mod error;
pub mod models;
pub mod observability;
pub mod parser;
pub mod producer;
pub mod transport;
pub mod window;

pub use anomaly::AnomalyDetector;
pub use channel::{Channel, ChannelPolicy, Comparison};
pub use error::{ParseError, SourceError, StateError, TransportError};
pub use models::{AlertEvent, Reading};
pub use observability::StructuredLogger;
pub use window::SlidingWindow;
