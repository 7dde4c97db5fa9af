//! Serde helpers for transaction dates.
//!
//! The budget service is not consistent about date formats: depending on the
//! entity it answers with RFC 3339 timestamps, naive date-times or plain
//! dates. Everything is normalized to a wall-clock [`NaiveDateTime`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer, de};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses any of the accepted date shapes.
///
/// ```rust
/// use api_types::dates::parse;
///
/// assert!(parse("2024-03-01").is_some());
/// assert!(parse("2024-03-01T10:30:00").is_some());
/// assert!(parse("2024-03-01T10:30:00+02:00").is_some());
/// assert!(parse("yesterday").is_none());
/// ```
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, NAIVE_FORMAT) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn serialize<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_str(&dt.format(NAIVE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {value}"))),
    }
}
