//! Storage Module
//!
//! String-keyed, string-valued substrate the preference cache writes to.
//! Modeled on browser session storage: synchronous, fail-fast calls and a
//! way to enumerate keys.

mod memory;

pub use memory::MemoryStorage;

use crate::error::StorageError;

// == Public Constants ==
/// Default byte budget of a storage substrate (keys plus values)
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024; // 5 MiB

// == Session Storage Trait ==
/// Session-scoped key-value substrate.
pub trait SessionStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Lists every key currently stored, including ones owned by other subsystems.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}
