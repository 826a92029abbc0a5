//! Configuration module for the inventory engine.
//!
//! Provides configuration loading with defaults, YAML parsing, and
//! validation for the engine's tunables.
//!
//! # Usage
//!
//! ```rust,ignore
//! use inventory_engine::config::{EngineConfig, load_config};
//!
//! // All defaults
//! let config = EngineConfig::default();
//!
//! // Load from a YAML file
//! let config = load_config("engine.yaml")?;
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Reservation lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationConfig {
    /// Minutes a reservation holds stock when the caller gives no
    /// expiration.
    pub default_expiration_minutes: u32,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            default_expiration_minutes: 30,
        }
    }
}

/// Per-record lock settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockingConfig {
    /// Bounded wait per lock acquisition, in milliseconds. Exceeding it
    /// surfaces a retryable contention error, never a permanent failure.
    pub max_wait_ms: u64,
}

impl Default for LockingConfig {
    fn default() -> Self {
        Self { max_wait_ms: 5_000 }
    }
}

impl LockingConfig {
    /// The bounded wait as a `Duration`.
    #[must_use]
    pub const fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

/// Expiry sweeper settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweeperConfig {
    /// Whether the periodic sweep runs at all. Expiry stays lazy when
    /// disabled.
    pub enabled: bool,
    /// Seconds between sweep passes.
    pub interval_secs: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
        }
    }
}

impl SweeperConfig {
    /// The sweep interval as a `Duration`.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reservation lifecycle settings.
    pub reservations: ReservationConfig,
    /// Per-record lock settings.
    pub locking: LockingConfig,
    /// Expiry sweeper settings.
    pub sweeper: SweeperConfig,
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if any tunable is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reservations.default_expiration_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "reservations.default_expiration_minutes must be at least 1".to_string(),
            ));
        }
        if self.locking.max_wait_ms == 0 {
            return Err(ConfigError::ValidationError(
                "locking.max_wait_ms must be at least 1".to_string(),
            ));
        }
        if self.sweeper.enabled && self.sweeper.interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "sweeper.interval_secs must be at least 1 when the sweeper is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load and validate engine configuration from a YAML file.
///
/// Missing keys fall back to their defaults.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed, or validated.
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    })?;
    let config: EngineConfig = serde_yaml_bw::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}
