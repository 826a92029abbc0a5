//! Structured logging for the inventory engine.
//!
//! Thin wrapper over `tracing-subscriber` so embedding processes get the
//! same env-filtered, formatted output everywhere.
//!
//! # Example
//!
//! ```ignore
//! use inventory_engine::observability::{LoggingConfig, init_logging};
//!
//! init_logging(&LoggingConfig::default()).expect("failed to initialize logging");
//! ```

use tracing_subscriber::EnvFilter;

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Include span targets in output.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set the fallback filter directive.
    #[must_use]
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }
}

/// Error type for logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to initialize the tracing subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, falling back to the configured default
/// directive.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| LoggingError::SubscriberError(e.to_string()))
}
