//! Raw timestamp utilities and rendering formats
//!
//! Records carry raw `u64` millisecond timestamps. This module owns the
//! clock that stamps them, the duration comparison the auto-flush policy
//! uses, and the formats appenders render them with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Current time as raw milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Elapsed time between two raw millisecond timestamps.
///
/// Saturating: when `newer` is behind `older` (reordered producers, or an
/// all-control batch reporting 0) the elapsed time is zero, never a wrap.
pub fn elapsed(newer: u64, older: u64) -> Duration {
    Duration::from_millis(newer.saturating_sub(older))
}

/// Rendering format for raw millisecond timestamps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// The raw millisecond value: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Render a raw millisecond timestamp.
    ///
    /// Values outside chrono's representable range fall back to the raw
    /// number rather than failing the appender.
    #[must_use]
    pub fn format_millis(&self, millis: u64) -> String {
        match self {
            TimestampFormat::UnixMillis => millis.to_string(),
            TimestampFormat::Iso8601 => match to_datetime(millis) {
                Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
                None => millis.to_string(),
            },
            TimestampFormat::Custom(format_str) => match to_datetime(millis) {
                Some(dt) => dt.format(format_str).to_string(),
                None => millis.to_string(),
            },
        }
    }
}

fn to_datetime(millis: u64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(i64::try_from(millis).ok()?)
}
