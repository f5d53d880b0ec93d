//! Storage error types.

use thiserror::Error;

/// Errors from a [`crate::KeyValueStore`] backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend I/O or transaction failure.
    ///
    /// Transient from the caller's point of view: the in-memory state stays
    /// authoritative and the next write may succeed.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// A thread panicked while holding the in-memory lock.
    #[error("storage lock poisoned")]
    Poisoned,
}
