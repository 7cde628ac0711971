//! Consumer loop: the background state machine that drains the queue
//!
//! Runs on the dispatcher's one worker thread. Blocks in the queue's batch
//! dequeue, interprets control commands, forwards records to the appender
//! chain, and applies the auto-flush timing policy. Any error or panic in
//! the loop body escalates through the injected fatal handler; a logging
//! subsystem that dies silently is worse than a loud, deterministic stop.

use super::appender::Appender;
use super::command::DispatchCommand;
use super::error::Result;
use super::metrics::DispatchMetrics;
use super::queue::QueueConsumer;
use super::record::LogRecord;
use super::timestamp;
use parking_lot::RwLock;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

/// Timestamp gap between batches beyond which the chain is auto-flushed
pub const AUTO_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Fixed diagnostic identifying the dispatcher on the fatal path
pub(crate) const FATAL_DIAGNOSTIC: &str = "asynchronous log dispatcher terminated";

/// Escalation capability invoked when the consumer loop fails.
///
/// The default handler prints the diagnostic to stderr and aborts the
/// process; tests substitute a recording handler.
pub type FatalHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Callback run once on the consumer thread, at startup or teardown
pub type ThreadCallback = Box<dyn FnOnce() + Send + 'static>;

pub(crate) fn default_fatal_handler() -> FatalHandler {
    Arc::new(|message| {
        eprintln!("[DISPATCH FATAL] {}", message);
        std::process::abort();
    })
}

pub(crate) struct ConsumerLoop {
    queue: QueueConsumer,
    appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
    metrics: Arc<DispatchMetrics>,
    on_init: Option<ThreadCallback>,
    on_cleanup: Option<ThreadCallback>,
    fatal: FatalHandler,
}

impl ConsumerLoop {
    pub(crate) fn new(
        queue: QueueConsumer,
        appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
        metrics: Arc<DispatchMetrics>,
        on_init: Option<ThreadCallback>,
        on_cleanup: Option<ThreadCallback>,
        fatal: FatalHandler,
    ) -> Self {
        Self {
            queue,
            appenders,
            metrics,
            on_init,
            on_cleanup,
            fatal,
        }
    }

    /// Thread entry point.
    ///
    /// The init callback runs to completion before any command is processed.
    /// The cleanup callback runs exactly once on normal termination (queue
    /// closure or Stop) and never on the fatal path.
    pub(crate) fn run(mut self) {
        if let Some(init) = self.on_init.take() {
            init();
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.drain()));

        match outcome {
            Ok(Ok(())) => {
                if let Some(cleanup) = self.on_cleanup.take() {
                    cleanup();
                }
            }
            Ok(Err(e)) => (self.fatal)(&format!("{}: {}", FATAL_DIAGNOSTIC, e)),
            Err(_) => (self.fatal)(&format!("{}: appender panicked", FATAL_DIAGNOSTIC)),
        }
    }

    fn drain(&mut self) -> Result<()> {
        // Batch buffer owned by the loop, sized by the queue's reservation
        // hint. last_timestamp is the previous batch's maximum.
        let mut batch: Vec<DispatchCommand> = Vec::with_capacity(self.queue.initial());
        let mut last_timestamp: u64 = 0;

        loop {
            // Blocks until data arrives; false means closed forever.
            if !self.queue.dequeue(&mut batch) {
                return Ok(());
            }

            let mut batch_max: u64 = 0;
            for command in batch.drain(..) {
                match command {
                    // Stop discards the remainder of this batch and all
                    // future batches.
                    DispatchCommand::Stop => return Ok(()),
                    DispatchCommand::Flush => self.flush_chain()?,
                    DispatchCommand::Record(record) => {
                        if record.timestamp > batch_max {
                            batch_max = record.timestamp;
                        }
                        self.forward(&record)?;
                    }
                }
            }

            if timestamp::elapsed(batch_max, last_timestamp) > AUTO_FLUSH_INTERVAL {
                self.flush_chain()?;
            }
            last_timestamp = batch_max;
        }
    }

    fn forward(&mut self, record: &LogRecord) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.process(record)?;
        }
        self.metrics.record_delivered();
        Ok(())
    }

    fn flush_chain(&mut self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        self.metrics.record_flush();
        Ok(())
    }
}
