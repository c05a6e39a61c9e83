//! Lull - single-slot debounce coordinator.
//!
//! This crate coalesces bursts of "run this later" requests, such as one per
//! keystroke, into a single delayed effect. Only the action from the most
//! recent request runs, and only once a quiet period has passed with no
//! further requests.
//!
//! # Guarantees
//!
//! - At most one action per debouncer is ever pending
//! - A replaced action never runs, even if its timer has already elapsed
//! - An action that has started is never interrupted
//! - Dropping a debouncer cancels its pending action
//!
//! # Modules
//!
//! - [`debouncer`]: Thread-safe [`Debouncer`] for use from any task or thread
//! - [`local`]: [`LocalDebouncer`] for single-threaded `LocalSet` code
//! - [`error`]: Error types for debouncer construction

pub mod debouncer;
pub mod error;
pub mod local;
mod unit;

pub use debouncer::{Debouncer, DEFAULT_DELAY, DEFAULT_DELAY_MS};
pub use error::{DebouncerError, Result};
pub use local::LocalDebouncer;
