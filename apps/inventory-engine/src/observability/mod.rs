//! Observability
//!
//! Structured logging setup for embedding processes.

mod tracing;

pub use self::tracing::{LoggingConfig, LoggingError, init_logging};
