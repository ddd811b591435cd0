//! Domain types for the love API.
//!
//! # Design
//! Both types are decoded by hand from `serde_json::Value` rather than with
//! `#[derive(Deserialize)]`: the wire names (`label`, `value`) differ from the
//! field names, every key is required, and the timestamp format is looser
//! than any single chrono serde adapter. Serialization is derived so the CLI
//! can print results as JSON.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::LoveError;

/// Naive layouts the API has been seen to emit. `%.f` also matches an absent
/// fractional part.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A single love: one message from one user to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Love {
    pub sender: String,
    pub recipient: String,
    pub message: String,
    pub timestamp: NaiveDateTime,
}

impl Love {
    /// Decode a love object. All four keys must be present and be strings.
    pub fn from_json(value: &Value) -> Result<Self, LoveError> {
        let object = as_object(value, "love")?;
        let sender = required_str(object, "sender")?;
        let recipient = required_str(object, "recipient")?;
        let message = required_str(object, "message")?;
        let timestamp = parse_timestamp(required_str(object, "timestamp")?)?;
        Ok(Love {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            message: message.to_string(),
            timestamp,
        })
    }
}

/// An autocomplete suggestion. `display` is usually `Full Name (username)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub display: String,
    pub username: String,
}

impl User {
    /// Decode a suggestion object with string keys `label` and `value`.
    pub fn from_json(value: &Value) -> Result<Self, LoveError> {
        let object = as_object(value, "autocomplete suggestion")?;
        Ok(User {
            display: required_str(object, "label")?.to_string(),
            username: required_str(object, "value")?.to_string(),
        })
    }
}

/// Parse `body` as a JSON array and decode every element with `decode`.
/// The first failing element fails the whole array.
pub fn decode_array<T>(
    body: &str,
    decode: impl Fn(&Value) -> Result<T, LoveError>,
) -> Result<Vec<T>, LoveError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| LoveError::Decode(e.to_string()))?;
    let items = value
        .as_array()
        .ok_or_else(|| LoveError::Decode("expected a JSON array".to_string()))?;
    items.iter().map(decode).collect()
}

/// Parse an API timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds, the same
/// with a space separator, and RFC 3339 with an offset (normalized to UTC).
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, LoveError> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.naive_utc())
        .map_err(|_| LoveError::Decode(format!("invalid timestamp encoding: {raw:?}")))
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, LoveError> {
    value
        .as_object()
        .ok_or_else(|| LoveError::Decode(format!("expected a {what} object, got {value}")))
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a str, LoveError> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(LoveError::Decode(format!(
            "key {key} must be a string, got {other}"
        ))),
        None => Err(LoveError::Decode(format!("missing key {key}"))),
    }
}
