//! Log record structure

use super::log_level::LogLevel;
use super::timestamp;
use serde::{Deserialize, Serialize};

/// A single unit of log data handed to the dispatcher.
///
/// The `timestamp` is raw milliseconds since the Unix epoch. The consumer
/// loop only ever compares timestamps; `level` and `message` are opaque to
/// the dispatch core and interpreted by appenders alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: u64,
    pub level: LogLevel,
    pub message: String,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Create a record stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp::now_millis(),
            level,
            message: Self::sanitize_message(&message.into()),
        }
    }

    /// Override the timestamp with an explicit raw millisecond value
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
