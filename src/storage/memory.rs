//! In-Memory Storage Module
//!
//! HashMap-backed session storage with a byte quota.

use std::collections::HashMap;

use crate::error::StorageError;
use crate::storage::{SessionStorage, DEFAULT_QUOTA_BYTES};

// == Memory Storage ==
/// In-memory session storage.
///
/// Usage is counted as the byte length of every key plus its value. A write
/// that would push usage past the quota is rejected and leaves the store
/// untouched.
#[derive(Debug)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota_bytes: usize,
    used_bytes: usize,
    available: bool,
}

impl MemoryStorage {
    // == Constructor ==
    /// Creates an empty store with the default quota.
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Creates an empty store holding at most `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes,
            used_bytes: 0,
            available: true,
        }
    }

    // == Availability ==
    /// Toggles availability. While unavailable every call fails with
    /// `StorageError::Unavailable`, as when session storage is disabled.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Bytes currently in use.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable(
                "session storage is disabled".to_string(),
            ))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_available()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_available()?;

        let replaced = self
            .items
            .get(key)
            .map(|old| key.len() + old.len())
            .unwrap_or(0);
        let needed = key.len() + value.len();
        let available = self.quota_bytes - (self.used_bytes - replaced);

        if needed > available {
            return Err(StorageError::QuotaExceeded { needed, available });
        }

        self.items.insert(key.to_string(), value.to_string());
        self.used_bytes = self.used_bytes - replaced + needed;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        if let Some(old) = self.items.remove(key) {
            self.used_bytes -= key.len() + old.len();
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.ensure_available()?;
        Ok(self.items.keys().cloned().collect())
    }
}
