//! Pipeline error types.

use thiserror::Error;

/// Errors that can occur during a build.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration error (malformed config or ignore file). Fatal.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error with context.
    #[error("File error: {0}")]
    File(String),

    /// Engine error.
    #[error("Engine error: {0}")]
    Engine(#[from] hintpipe_engine::EngineError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Build rejected by the `fail_on_any_error` policy.
    #[error("JSHint failed: {0} error(s) found")]
    Failed(usize),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }
}
