//! Keyed async lock manager.
//!
//! One mutex per stock identity. Every mutating stock operation takes the
//! key's lock before reading quantities and holds it until its commit
//! batch is applied, which serializes mutations per record while leaving
//! different records fully concurrent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::OwnedMutexGuard;

/// Lock acquisition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The bounded wait elapsed before the key's lock was free.
    #[error("timed out waiting for lock on key '{key}'")]
    Timeout {
        /// The contended key.
        key: String,
    },
}

/// Guard for one acquired key. The key stays locked until the guard drops.
#[derive(Debug)]
pub struct KeyedLockGuard {
    _guard: OwnedMutexGuard<()>,
}

/// Manager handing out per-key async mutexes with a bounded wait.
///
/// Waiters queue fairly on each key's mutex, so callers block (in FIFO
/// order) rather than fail fast; only exceeding `max_wait` surfaces an
/// error. The table keeps one entry per distinct key for the life of the
/// manager, bounded by the number of stock identities.
#[derive(Debug)]
pub struct KeyedLockManager {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
    max_wait: Duration,
}

impl KeyedLockManager {
    /// Create a manager with the given bounded wait per acquisition.
    #[must_use]
    pub fn new(max_wait: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            max_wait,
        }
    }

    /// Acquire the lock for `key`, waiting at most the configured bound.
    ///
    /// # Errors
    ///
    /// Returns `LockError::Timeout` if the wait elapses; the caller may
    /// retry the whole operation.
    pub async fn acquire(&self, key: &str) -> Result<KeyedLockGuard, LockError> {
        let entry = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };

        match tokio::time::timeout(self.max_wait, entry.lock_owned()).await {
            Ok(guard) => Ok(KeyedLockGuard { _guard: guard }),
            Err(_) => Err(LockError::Timeout {
                key: key.to_string(),
            }),
        }
    }

    /// Number of keys the manager has seen.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
