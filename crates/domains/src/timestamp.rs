//! # Timestamp
//!
//! The `created` value of a post. Parsed to a UTC instant for ordering and
//! comparison; the text it was read from is written back untouched so that a
//! load/commit cycle never rewrites a stored timestamp.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Timelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Offset-less forms, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    /// Stored text, kept verbatim when the value came from disk.
    text: Option<String>,
}

impl Timestamp {
    /// Current UTC time, truncated to microseconds.
    pub fn now() -> Self {
        Utc::now().trunc_subsecs(6).into()
    }

    /// Accepts RFC 3339, or ISO-8601 date/date-time without an offset (taken as UTC).
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let instant = match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(rfc_err) => parse_naive(raw).ok_or(rfc_err)?,
        };
        Ok(Self {
            instant,
            text: Some(raw.to_string()),
        })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The stored text, or `2024-05-01T10:20:30.123456+00:00` style for new values.
    pub fn to_iso8601(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => format_instant(&self.instant),
        }
    }
}

fn parse_naive(raw: &str) -> Option<DateTime<Utc>> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Seconds when there is no fraction, microseconds when that is exact,
/// nanoseconds otherwise.
fn format_instant(instant: &DateTime<Utc>) -> String {
    let nanos = instant.nanosecond();
    let precision = if nanos == 0 {
        SecondsFormat::Secs
    } else if nanos % 1_000 == 0 {
        SecondsFormat::Micros
    } else {
        SecondsFormat::Nanos
    };
    instant.to_rfc3339_opts(precision, false)
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self { instant, text: None }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(|e| de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}
