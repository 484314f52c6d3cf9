//! Wire-format parsing for temperature readings
//!
//! Messages travel as UTF-8 text of the form
//! `Temperature at <timestamp> is <value>`. The timestamp is opaque and may
//! itself contain spaces, so the value is split off at the last ` is ` in
//! the payload.

use crate::error::ParseError;
use crate::models::Reading;

const PREFIX: &str = "Temperature at ";
const SEPARATOR: &str = " is ";

/// Parse a raw message payload into a reading.
///
/// Pure function with no side effects. On failure the caller still
/// acknowledges the message so an unparseable payload is never redelivered
/// forever.
pub fn parse_reading(payload: &str) -> Result<Reading, ParseError> {
    let rest = payload.strip_prefix(PREFIX).ok_or(ParseError::Malformed)?;
    let (timestamp, value) = rest.rsplit_once(SEPARATOR).ok_or(ParseError::Malformed)?;
    if timestamp.is_empty() {
        return Err(ParseError::Malformed);
    }
    let temperature = value
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::NonNumeric(value.to_string()))?;
    Ok(Reading {
        timestamp: timestamp.to_string(),
        temperature,
    })
}

/// Format a message for the wire; inverse of [`parse_reading`].
///
/// The value is passed through verbatim so the distributor publishes source
/// fields unmodified.
pub fn format_message(timestamp: &str, value: &str) -> String {
    format!("{PREFIX}{timestamp}{SEPARATOR}{value}")
}
