//! Public dispatcher: lifecycle, submission and shutdown

use super::appender::Appender;
use super::command::DispatchCommand;
use super::consumer::{default_fatal_handler, ConsumerLoop, FatalHandler, ThreadCallback};
use super::error::{DispatchError, Result};
use super::metrics::DispatchMetrics;
use super::queue::{self, QueueProducer};
use super::record::LogRecord;
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Default queue capacity when the builder is not given one
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

/// Asynchronous log-record dispatcher.
///
/// Owns exactly one bounded queue and exactly one consumer thread for its
/// lifetime. Producers submit records without blocking; the consumer thread
/// drains the queue in batches and forwards records, in arrival order, to
/// the appender chain.
///
/// # Example
///
/// ```
/// use log_dispatch::prelude::*;
///
/// let capture = MemoryAppender::new();
/// let mut dispatcher = AsyncDispatcher::builder()
///     .capacity(128)
///     .appender(capture.clone())
///     .build()
///     .expect("dispatcher starts");
///
/// dispatcher.submit(LogRecord::new(LogLevel::Info, "hello"));
/// dispatcher.shutdown().expect("clean shutdown");
///
/// assert_eq!(capture.messages(), vec!["hello".to_string()]);
/// ```
pub struct AsyncDispatcher {
    producer: Option<QueueProducer>,
    handle: Option<JoinHandle<()>>,
    appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
    metrics: Arc<DispatchMetrics>,
    capacity: usize,
}

impl AsyncDispatcher {
    /// Create a builder for the dispatcher
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Create a dispatcher with default settings and the given queue capacity
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        DispatcherBuilder::new().capacity(capacity).build()
    }

    /// Submit a record for asynchronous delivery.
    ///
    /// Returns `true` when the record was accepted into the queue, `false`
    /// when the queue is full or the dispatcher has stopped. Never blocks
    /// the caller; drop/retry policy is the caller's decision. Safe to call
    /// concurrently from any number of producer threads.
    pub fn submit(&self, record: LogRecord) -> bool {
        self.send(DispatchCommand::Record(record))
    }

    /// Request a flush of the appender chain.
    ///
    /// The flush command travels through the queue, so it is ordered after
    /// every record submitted before it. Asynchronous: returns before the
    /// flush actually happens. Returns `false` when the command was dropped
    /// because the queue was full.
    pub fn flush(&self) -> bool {
        self.send(DispatchCommand::Flush)
    }

    fn send(&self, command: DispatchCommand) -> bool {
        let Some(producer) = self.producer.as_ref() else {
            self.metrics.record_dropped();
            return false;
        };

        if producer.enqueue(command) {
            self.metrics.record_enqueued();
            true
        } else {
            self.metrics.record_queue_full();
            self.metrics.record_dropped();
            false
        }
    }

    /// Stop the consumer thread and wait for it to exit.
    ///
    /// Enqueues exactly one Stop command, ordered after everything already
    /// submitted, then joins the consumer thread with no timeout: every
    /// record accepted before this call is delivered before it returns. A
    /// permanently stalled appender therefore blocks shutdown indefinitely.
    ///
    /// # Errors
    ///
    /// `AlreadyStopped` when called twice; `WorkerPanicked` when the
    /// consumer thread could not be joined cleanly.
    pub fn shutdown(&mut self) -> Result<()> {
        let producer = self
            .producer
            .take()
            .ok_or(DispatchError::AlreadyStopped)?;

        // Blocking send: teardown must not drop the Stop command when the
        // queue happens to be full. Fails only if the consumer is already
        // gone (fatal exit), in which case the join below still settles.
        let _ = producer.enqueue_blocking(DispatchCommand::Stop);
        drop(producer);

        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| DispatchError::WorkerPanicked)?;
        }
        Ok(())
    }

    /// Add an appender to the downstream chain
    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        let mut appenders = self.appenders.write();
        appenders.push(appender);
    }

    /// Queue capacity this dispatcher was built with
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Metrics for observability of the hand-off
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }
}

impl Drop for AsyncDispatcher {
    fn drop(&mut self) {
        if self.producer.is_some() {
            if let Err(e) = self.shutdown() {
                eprintln!("[DISPATCH WARNING] Shutdown during drop failed: {}", e);
            }
        }
    }
}

/// Builder for constructing an `AsyncDispatcher` with a fluent API
///
/// # Example
/// ```
/// use log_dispatch::prelude::*;
///
/// let dispatcher = AsyncDispatcher::builder()
///     .capacity(1024)
///     .initial_reservation(256)
///     .appender(MemoryAppender::new())
///     .on_thread_init(|| {})
///     .build()
///     .expect("dispatcher starts");
/// # drop(dispatcher);
/// ```
pub struct DispatcherBuilder {
    capacity: usize,
    initial_reservation: Option<usize>,
    appenders: Vec<Box<dyn Appender>>,
    on_thread_init: Option<ThreadCallback>,
    on_thread_cleanup: Option<ThreadCallback>,
    fatal_handler: Option<FatalHandler>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            initial_reservation: None,
            appenders: Vec::new(),
            on_thread_init: None,
            on_thread_cleanup: None,
            fatal_handler: None,
        }
    }

    /// Set the queue capacity (must be non-zero)
    #[must_use = "builder methods return a new value"]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Reservation hint for the consumer-side batch buffer.
    ///
    /// Defaults to the queue capacity.
    #[must_use = "builder methods return a new value"]
    pub fn initial_reservation(mut self, initial: usize) -> Self {
        self.initial_reservation = Some(initial);
        self
    }

    /// Add an appender to the downstream chain
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Callback run on the consumer thread before any command is processed
    #[must_use = "builder methods return a new value"]
    pub fn on_thread_init(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_thread_init = Some(Box::new(callback));
        self
    }

    /// Callback run on the consumer thread after normal termination.
    ///
    /// Skipped when the loop dies through the fatal handler.
    #[must_use = "builder methods return a new value"]
    pub fn on_thread_cleanup(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_thread_cleanup = Some(Box::new(callback));
        self
    }

    /// Substitute the escalation handler for consumer-loop failures.
    ///
    /// The default prints a diagnostic to stderr and aborts the process.
    #[must_use = "builder methods return a new value"]
    pub fn fatal_handler(mut self, handler: FatalHandler) -> Self {
        self.fatal_handler = Some(handler);
        self
    }

    /// Build the dispatcher: create the queue and start the consumer thread.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for a zero capacity; `ThreadSpawn` when the
    /// consumer thread cannot be started.
    pub fn build(self) -> Result<AsyncDispatcher> {
        if self.capacity == 0 {
            return Err(DispatchError::config(
                "AsyncDispatcher",
                "queue capacity must be non-zero",
            ));
        }

        let initial = self.initial_reservation.unwrap_or(self.capacity);
        let (producer, consumer) = queue::bounded(self.capacity, initial);
        let appenders: Arc<RwLock<Vec<Box<dyn Appender>>>> =
            Arc::new(RwLock::new(self.appenders));
        let metrics = Arc::new(DispatchMetrics::new());

        let worker = ConsumerLoop::new(
            consumer,
            Arc::clone(&appenders),
            Arc::clone(&metrics),
            self.on_thread_init,
            self.on_thread_cleanup,
            self.fatal_handler.unwrap_or_else(default_fatal_handler),
        );

        let handle = thread::Builder::new()
            .name("log-dispatch".into())
            .spawn(move || worker.run())
            .map_err(DispatchError::thread_spawn)?;

        Ok(AsyncDispatcher {
            producer: Some(producer),
            handle: Some(handle),
            appenders,
            metrics,
            capacity: self.capacity,
        })
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
