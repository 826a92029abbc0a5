//! Concurrency primitives for the stock engine.

mod keyed_lock;

pub use keyed_lock::{KeyedLockGuard, KeyedLockManager, LockError};
