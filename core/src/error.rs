//! Error types for the Lull debounce coordinator.
//!
//! Scheduling itself never fails. The only fallible step is building a
//! [`Debouncer`](crate::Debouncer) without an explicit runtime handle, which
//! requires being inside a Tokio runtime.

use thiserror::Error;

/// Errors that can occur while constructing a debouncer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DebouncerError {
    /// No Tokio runtime was available to drive the debounce timers.
    #[error("no Tokio runtime available to drive debounce timers")]
    NoRuntime,
}

/// A specialized `Result` type for debouncer construction.
pub type Result<T> = std::result::Result<T, DebouncerError>;
