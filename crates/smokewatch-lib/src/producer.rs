//! Reading distribution to the per-attribute queues
//!
//! Reads the ordered record source, splits each record into one message per
//! present attribute, and publishes each to its channel's durable queue at
//! a fixed cadence to emulate real-time sensor arrival.

use std::io::BufRead;
use std::time::Duration;

use async_trait::async_trait;

use crate::channel::Channel;
use crate::error::{SourceError, TransportError};
use crate::observability::StructuredLogger;
use crate::parser;
use crate::transport::Transport;

/// Fields expected on every record line.
const RECORD_FIELDS: usize = 4;

/// Sink for outgoing messages.
///
/// The AMQP implementation publishes persistent messages to durable
/// queues; tests substitute an in-memory implementation.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish(&self, queue: &str, payload: &str) -> Result<(), TransportError>;
}

#[async_trait]
impl MessagePublisher for Transport {
    async fn publish(&self, queue: &str, payload: &str) -> Result<(), TransportError> {
        self.publish_persistent(queue, payload).await
    }
}

/// One input record: a timestamp and up to three attribute temperatures.
///
/// An omitted attribute is not an error; that channel simply receives no
/// message for the cycle and its window fills more slowly.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: String,
    pub smoker_temp: Option<String>,
    pub food_a_temp: Option<String>,
    pub food_b_temp: Option<String>,
}

impl Record {
    /// Parse one comma-separated line; empty attribute fields become `None`.
    ///
    /// The source format is fixed four-column with no quoting, so a line
    /// with any other field count is a fatal source error.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self, SourceError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != RECORD_FIELDS {
            return Err(SourceError::FieldCount {
                line: line_number,
                found: fields.len(),
                expected: RECORD_FIELDS,
            });
        }

        let optional = |field: &str| {
            let field = field.trim();
            (!field.is_empty()).then(|| field.to_string())
        };

        Ok(Record {
            timestamp: fields[0].trim().to_string(),
            smoker_temp: optional(fields[1]),
            food_a_temp: optional(fields[2]),
            food_b_temp: optional(fields[3]),
        })
    }

    /// Attribute values present on this record, paired with their channels.
    fn attributes(&self) -> impl Iterator<Item = (Channel, &str)> + '_ {
        [
            (Channel::Smoker, self.smoker_temp.as_deref()),
            (Channel::FoodA, self.food_a_temp.as_deref()),
            (Channel::FoodB, self.food_b_temp.as_deref()),
        ]
        .into_iter()
        .filter_map(|(channel, value)| value.map(|value| (channel, value)))
    }
}

/// Publishes the record stream onto the per-attribute queues.
pub struct ReadingDistributor<P> {
    publisher: P,
    cadence: Duration,
    logger: StructuredLogger,
}

impl<P: MessagePublisher> ReadingDistributor<P> {
    /// The cadence is injectable so tests can run without pacing.
    pub fn new(publisher: P, cadence: Duration) -> Self {
        Self {
            publisher,
            cadence,
            logger: StructuredLogger::new("distributor"),
        }
    }

    /// Consume the distributor, returning its publisher.
    pub fn into_publisher(self) -> P {
        self.publisher
    }

    /// Publish one message per present attribute of the record.
    pub async fn distribute(&self, record: &Record) -> Result<(), TransportError> {
        for (channel, value) in record.attributes() {
            let payload = parser::format_message(&record.timestamp, value);
            self.publisher.publish(channel.queue(), &payload).await?;
            self.logger.log_published(channel.queue(), &payload);
        }
        Ok(())
    }

    /// Read records from the source and publish them until exhausted.
    ///
    /// The first line is a header and is skipped. After each record the
    /// distributor blocks for the configured cadence; pacing emulates
    /// sensor arrival and is not backpressure-driven.
    pub async fn run(&self, source: impl BufRead) -> anyhow::Result<()> {
        let mut lines = source.lines();

        // Header row.
        if let Some(header) = lines.next() {
            header.map_err(SourceError::Io)?;
        }

        for (index, line) in lines.enumerate() {
            let line = line.map_err(SourceError::Io)?;
            if line.trim().is_empty() {
                continue;
            }

            let record = Record::parse_line(&line, index + 2)?;
            self.distribute(&record).await?;

            tokio::time::sleep(self.cadence).await;
        }

        self.logger.log_shutdown("record source exhausted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// In-memory publisher recording every (queue, payload) pair.
    #[derive(Clone, Default)]
    struct MockPublisher {
        sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl MessagePublisher for MockPublisher {
        async fn publish(&self, queue: &str, payload: &str) -> Result<(), TransportError> {
            self.sent
                .lock()
                .unwrap()
                .push((queue.to_string(), payload.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_parse_line_with_all_fields() {
        let record = Record::parse_line("07/08/2026 10:30:00,225.5,150.2,148.9", 2).unwrap();
        assert_eq!(record.timestamp, "07/08/2026 10:30:00");
        assert_eq!(record.smoker_temp.as_deref(), Some("225.5"));
        assert_eq!(record.food_a_temp.as_deref(), Some("150.2"));
        assert_eq!(record.food_b_temp.as_deref(), Some("148.9"));
    }

    #[test]
    fn test_parse_line_empty_fields_become_none() {
        let record = Record::parse_line("t,225.5,,", 2).unwrap();
        assert_eq!(record.smoker_temp.as_deref(), Some("225.5"));
        assert_eq!(record.food_a_temp, None);
        assert_eq!(record.food_b_temp, None);
    }

    #[test]
    fn test_parse_line_wrong_field_count_fails() {
        let err = Record::parse_line("t,225.5,150.2", 7).unwrap_err();
        assert!(matches!(
            err,
            SourceError::FieldCount {
                line: 7,
                found: 3,
                expected: 4,
            }
        ));
    }

    #[tokio::test]
    async fn test_distribute_publishes_one_message_per_present_attribute() {
        let publisher = MockPublisher::default();
        let sent = publisher.sent.clone();
        let distributor = ReadingDistributor::new(publisher, Duration::ZERO);

        let record = Record::parse_line("10:30:00,225.5,,148.9", 2).unwrap();
        distributor.distribute(&record).await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![
                (
                    "01-smoker".to_string(),
                    "Temperature at 10:30:00 is 225.5".to_string()
                ),
                (
                    "03-food-B".to_string(),
                    "Temperature at 10:30:00 is 148.9".to_string()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_run_skips_header_and_paces_with_injected_cadence() {
        let publisher = MockPublisher::default();
        let sent = publisher.sent.clone();
        let distributor = ReadingDistributor::new(publisher, Duration::ZERO);

        let source = Cursor::new(
            "Time (UTC),Channel1,Channel2,Channel3\n\
             10:30:00,225.5,150.2,148.9\n\
             10:30:30,226.1,,149.0\n",
        );
        distributor.run(source).await.unwrap();

        let sent = sent.lock().unwrap();
        // Header published nothing; record two omitted food A.
        assert_eq!(sent.len(), 5);
        assert!(sent
            .iter()
            .all(|(_, payload)| payload.starts_with("Temperature at ")));
        assert_eq!(
            sent.iter().filter(|(queue, _)| queue == "02-food-A").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_run_fails_on_malformed_record() {
        let publisher = MockPublisher::default();
        let distributor = ReadingDistributor::new(publisher, Duration::ZERO);

        let source = Cursor::new("header\n10:30:00,225.5\n");
        assert!(distributor.run(source).await.is_err());
    }
}
