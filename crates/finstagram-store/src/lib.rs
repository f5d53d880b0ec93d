//! Key/value persistence for client state that must survive restarts.
//!
//! The client persists exactly two string values (the logged-in username and
//! the last active view), so the abstraction is a flat string map rather than
//! a typed schema. The trait is synchronous: writes are tiny and happen only
//! on user-driven transitions.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod durable;
mod error;
mod memory;

pub use durable::RedbStore;
pub use error::StoreError;
pub use memory::MemoryStore;

/// Durable string key/value store.
///
/// Must be Clone (the session store and the runtime may both hold a handle),
/// Send + Sync, and synchronous. Implementations share internal state via
/// `Arc`, so clones access the same underlying storage.
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    /// Value stored under `key`. `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`.
    ///
    /// Idempotent: removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
