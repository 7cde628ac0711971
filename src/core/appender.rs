//! Appender trait for downstream output destinations

use super::{error::Result, record::LogRecord};

/// A downstream sink in the formatting/output chain.
///
/// The consumer thread calls `process` for every delivered record and
/// `flush` for explicit and automatic flushes, always from that one thread.
pub trait Appender: Send + Sync {
    fn process(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
