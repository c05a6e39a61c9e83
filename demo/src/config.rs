//! Configuration module for the Lull demo.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `LULL_DELAY_MS` | No | 1000 | Quiet period before the query is applied |
//! | `LULL_KEYSTROKE_MS` | No | 100 | Simulated delay between keystrokes |
//!
//! # Example
//!
//! ```no_run
//! use lull_demo::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Quiet period: {:?}", config.delay);
//! ```

use std::env;
use std::time::Duration;

use lull_core::DEFAULT_DELAY_MS;
use thiserror::Error;

/// Default delay between simulated keystrokes, in milliseconds.
const DEFAULT_KEYSTROKE_MS: u64 = 100;

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Configuration for the Lull demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Quiet period the debouncer waits for before applying a query.
    pub delay: Duration,

    /// Pause between characters when simulating typing.
    pub keystroke_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            keystroke_interval: Duration::from_millis(DEFAULT_KEYSTROKE_MS),
        }
    }
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `LULL_DELAY_MS` is set but is not a positive integer
    /// - `LULL_KEYSTROKE_MS` is set but is not a non-negative integer
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        // Optional: LULL_DELAY_MS (default: 1000, must be > 0)
        let delay = match env::var("LULL_DELAY_MS") {
            Ok(val) => Duration::from_millis(parse_delay_ms("LULL_DELAY_MS", &val)?),
            Err(_) => defaults.delay,
        };

        // Optional: LULL_KEYSTROKE_MS (default: 100, zero types instantly)
        let keystroke_interval = match env::var("LULL_KEYSTROKE_MS") {
            Ok(val) => {
                let ms = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "LULL_KEYSTROKE_MS".to_string(),
                    message: format!("expected non-negative integer, got '{val}'"),
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => defaults.keystroke_interval,
        };

        Ok(Self {
            delay,
            keystroke_interval,
        })
    }

    /// Applies command-line overrides on top of this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `delay_ms` is zero.
    pub fn with_overrides(
        mut self,
        delay_ms: Option<u64>,
        keystroke_ms: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(ms) = delay_ms {
            if ms == 0 {
                return Err(zero_delay("--delay-ms"));
            }
            self.delay = Duration::from_millis(ms);
        }
        if let Some(ms) = keystroke_ms {
            self.keystroke_interval = Duration::from_millis(ms);
        }
        Ok(self)
    }
}

fn parse_delay_ms(key: &str, val: &str) -> Result<u64, ConfigError> {
    let ms = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected positive integer, got '{val}'"),
    })?;
    if ms == 0 {
        return Err(zero_delay(key));
    }
    Ok(ms)
}

fn zero_delay(key: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: "delay must be greater than 0".to_string(),
    }
}
