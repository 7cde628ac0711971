//! Appender implementations

#[cfg(feature = "console")]
pub mod console;
pub mod file;
pub mod json;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use json::JsonAppender;
pub use memory::{CapturedEvent, MemoryAppender};

// Re-export the trait for convenience
pub use crate::core::Appender;
