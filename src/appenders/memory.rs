//! In-memory capture appender
//!
//! Records every delivery and flush into a shared buffer. The observation
//! point for this crate's own tests, and for applications that want to
//! assert on what their logging produced.

use crate::core::{Appender, LogRecord, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// One observed downstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedEvent {
    Record(LogRecord),
    Flush,
}

/// Appender that captures events instead of emitting them.
///
/// Cloning shares the underlying buffer: keep one handle, give a clone to
/// the dispatcher, and inspect the handle afterwards.
///
/// # Example
///
/// ```
/// use log_dispatch::prelude::*;
///
/// let capture = MemoryAppender::new();
/// let mut dispatcher = AsyncDispatcher::builder()
///     .capacity(8)
///     .appender(capture.clone())
///     .build()
///     .expect("dispatcher starts");
///
/// dispatcher.submit(LogRecord::new(LogLevel::Info, "observed"));
/// dispatcher.shutdown().expect("clean shutdown");
///
/// assert_eq!(capture.messages(), vec!["observed".to_string()]);
/// ```
#[derive(Clone, Default)]
pub struct MemoryAppender {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every captured event, in delivery order
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    /// Messages of the captured records, in delivery order
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                CapturedEvent::Record(record) => Some(record.message.clone()),
                CapturedEvent::Flush => None,
            })
            .collect()
    }

    /// Number of flushes observed
    pub fn flush_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, CapturedEvent::Flush))
            .count()
    }

    /// Number of records observed
    pub fn record_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, CapturedEvent::Record(_)))
            .count()
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn process(&mut self, record: &LogRecord) -> Result<()> {
        self.events.lock().push(CapturedEvent::Record(record.clone()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.events.lock().push(CapturedEvent::Flush);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
