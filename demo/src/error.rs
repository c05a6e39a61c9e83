//! Error types for the Lull demo.

use lull_core::DebouncerError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running the demo.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The debouncer could not be created.
    #[error("debouncer error: {0}")]
    Debouncer(#[from] DebouncerError),

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for demo operations.
pub type Result<T> = std::result::Result<T, DemoError>;
