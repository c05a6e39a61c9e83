//! Lull Demo - search-as-you-type driver.
//!
//! This crate wires a [`lull_core::Debouncer`] to a minimal search model so
//! the coalescing behavior can be observed from a terminal.
//!
//! # Modules
//!
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types for demo operations
//! - [`search`]: Search field model whose query is debounced

pub mod config;
pub mod error;
pub mod search;

pub use config::{Config, ConfigError};
pub use error::{DemoError, Result};
pub use search::{simulate_typing, SearchBox};
