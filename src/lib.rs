//! # Log Dispatch
//!
//! An asynchronous log-record dispatch core: producer threads hand records to
//! a bounded queue without ever blocking on I/O, and a single background
//! consumer thread drains the queue in batches and forwards records, in
//! order, to a chain of appenders.
//!
//! ## Features
//!
//! - **Non-Blocking Producers**: `submit` and `flush` fail fast instead of
//!   blocking when the queue is full
//! - **Ordered Delivery**: single consumer, single queue — records reach the
//!   appender chain in arrival order
//! - **Auto-Flush**: the chain is flushed whenever record timestamps jump by
//!   more than one second
//! - **Explicit Lifecycle**: fallible construction and a `shutdown` that
//!   drains everything submitted before it

pub mod appenders;
pub mod core;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    pub use crate::appenders::{CapturedEvent, FileAppender, JsonAppender, MemoryAppender};
    pub use crate::core::{
        Appender, AsyncDispatcher, DispatchCommand, DispatchError, DispatchMetrics,
        DispatcherBuilder, FatalHandler, LogLevel, LogRecord, Result, ThreadCallback,
        TimestampFormat, AUTO_FLUSH_INTERVAL, DEFAULT_QUEUE_CAPACITY,
    };
}

#[cfg(feature = "console")]
pub use appenders::ConsoleAppender;
pub use appenders::{CapturedEvent, FileAppender, JsonAppender, MemoryAppender};
pub use core::{
    Appender, AsyncDispatcher, DispatchCommand, DispatchError, DispatchMetrics, DispatcherBuilder,
    FatalHandler, LogLevel, LogRecord, Result, ThreadCallback, TimestampFormat,
    AUTO_FLUSH_INTERVAL, DEFAULT_QUEUE_CAPACITY,
};
