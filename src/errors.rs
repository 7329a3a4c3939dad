// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirhookError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("invalid post_process value in config: {0} (expected 0, 1 or -1)")]
    InvalidPostProcess(i64),

    #[error("task queue is closed")]
    QueueClosed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DirhookError {
    /// Errors that must bring the whole process down when they surface
    /// inside a worker, instead of only abandoning the current task.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DirhookError::InvalidPostProcess(_))
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DirhookError>;
