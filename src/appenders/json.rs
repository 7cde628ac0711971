//! JSON appender for structured output

use crate::core::{Appender, LogRecord, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON file appender
///
/// Writes each record as a single-line JSON object (JSONL format),
/// compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonAppender {
    writer: BufWriter<File>,
}

impl JsonAppender {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Appender for JsonAppender {
    fn name(&self) -> &str {
        "json"
    }

    fn process(&mut self, record: &LogRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LogRecord};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_appender() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let mut appender = JsonAppender::new(&log_path)?;
        appender.process(&LogRecord::new(LogLevel::Info, "User logged in").with_timestamp(99))?;
        appender.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let json: serde_json::Value = serde_json::from_str(content.trim())?;

        assert_eq!(json["timestamp"], 99);
        assert_eq!(json["level"], "Info");
        assert_eq!(json["message"], "User logged in");
        Ok(())
    }
}
