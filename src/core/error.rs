//! Error types for the dispatch core

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Consumer thread could not be spawned
    #[error("Failed to spawn dispatch thread: {source}")]
    ThreadSpawn {
        #[source]
        source: std::io::Error,
    },

    /// Dispatcher already shut down
    #[error("Dispatcher already stopped")]
    AlreadyStopped,

    /// Consumer thread panicked and could not be joined cleanly
    #[error("Dispatch thread panicked before join")]
    WorkerPanicked,

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl DispatchError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        DispatchError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a thread spawn error
    pub fn thread_spawn(source: std::io::Error) -> Self {
        DispatchError::ThreadSpawn { source }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        DispatchError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DispatchError::Other(msg.into())
    }
}
