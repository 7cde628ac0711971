//! Core dispatch types and traits

pub mod appender;
pub mod command;
pub mod consumer;
pub mod dispatcher;
pub mod error;
pub mod log_level;
pub mod metrics;
pub mod queue;
pub mod record;
pub mod timestamp;

pub use appender::Appender;
pub use command::DispatchCommand;
pub use consumer::{FatalHandler, ThreadCallback, AUTO_FLUSH_INTERVAL};
pub use dispatcher::{AsyncDispatcher, DispatcherBuilder, DEFAULT_QUEUE_CAPACITY};
pub use error::{DispatchError, Result};
pub use log_level::LogLevel;
pub use metrics::DispatchMetrics;
pub use record::LogRecord;
pub use timestamp::TimestampFormat;
