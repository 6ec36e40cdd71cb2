//! Preference Cache Module
//!
//! Per-lead cache of preference snapshots on top of a session storage
//! substrate. Expiry is checked lazily on read; there is no background sweep.
//!
//! The cache is best-effort. Storage and parse failures are logged and
//! downgraded to a miss or a dropped write, never returned to the caller.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, DEFAULT_TTL_MS, KEY_PREFIX};
use crate::clock::Clock;
use crate::error::{CacheError, StorageError};
use crate::models::Lead;
use crate::storage::{MemoryStorage, SessionStorage};

// == Cache Lookup ==
/// Outcome of a cache lookup.
///
/// `get` collapses everything but `Hit` into "absent"; `lookup` keeps the
/// distinction for callers that want it.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Fresh snapshot found
    Hit(Lead),
    /// Nothing stored for the lead
    Miss,
    /// Entry outlived the TTL and was purged
    Expired,
    /// Stored text failed to parse and was purged
    Corrupt,
    /// Storage failed to answer
    Unavailable,
    /// Lead id was empty
    InvalidKey,
}

impl CacheLookup {
    /// Returns the snapshot on a hit.
    pub fn into_lead(self) -> Option<Lead> {
        match self {
            CacheLookup::Hit(lead) => Some(lead),
            _ => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }
}

// == Preference Cache ==
/// Time-bounded lead preference cache.
pub struct PreferenceCache<S = MemoryStorage> {
    /// Session storage substrate
    storage: S,
    /// Time source for stamping and expiry
    clock: Arc<dyn Clock>,
    /// Freshness window in milliseconds
    ttl_ms: u64,
    /// Lookup and failure counters
    stats: CacheStats,
}

impl<S: SessionStorage> PreferenceCache<S> {
    // == Constructor ==
    /// Creates a cache with the default 5 minute TTL.
    pub fn new(storage: S, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(storage, clock, DEFAULT_TTL_MS)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(storage: S, clock: Arc<dyn Clock>, ttl_ms: u64) -> Self {
        Self {
            storage,
            clock,
            ttl_ms,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Returns the cached snapshot for `lead_id` if present and fresh.
    pub fn get(&mut self, lead_id: &str) -> Option<Lead> {
        self.lookup(lead_id).into_lead()
    }

    // == Lookup ==
    /// Looks up `lead_id`, purging expired or unparsable entries.
    pub fn lookup(&mut self, lead_id: &str) -> CacheLookup {
        if !is_valid_lead_id(lead_id) {
            warn!("Preference lookup with invalid lead id {:?}", lead_id);
            self.stats.record_miss();
            return CacheLookup::InvalidKey;
        }

        let key = storage_key(lead_id);
        let raw = match self.storage.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Preference cache miss for lead {}", lead_id);
                self.stats.record_miss();
                return CacheLookup::Miss;
            }
            Err(e) => {
                warn!("Failed to read cached preferences for lead {}: {}", lead_id, e);
                self.stats.record_miss();
                return CacheLookup::Unavailable;
            }
        };

        let entry = match CacheEntry::decode(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    "Discarding unreadable cached preferences for lead {}: {}",
                    lead_id,
                    CacheError::from(e)
                );
                self.purge(&key);
                self.stats.record_corrupt();
                return CacheLookup::Corrupt;
            }
        };

        let now = self.clock.now_ms();
        if entry.is_expired(now, self.ttl_ms) {
            debug!(
                "Cached preferences for lead {} expired ({} ms old)",
                lead_id,
                entry.age_ms(now)
            );
            self.purge(&key);
            self.stats.record_expired();
            return CacheLookup::Expired;
        }

        debug!("Preference cache hit for lead {}", lead_id);
        self.stats.record_hit();
        CacheLookup::Hit(entry.data)
    }

    // == Set ==
    /// Stores `data` for `lead_id`, replacing any previous snapshot.
    pub fn set(&mut self, lead_id: &str, data: &Lead) {
        if !is_valid_lead_id(lead_id) {
            warn!("Ignoring preference write with invalid lead id {:?}", lead_id);
            return;
        }

        let entry = CacheEntry::new(data.clone(), self.clock.now_ms());
        if let Err(e) = self.write(lead_id, &entry) {
            warn!("Failed to cache preferences for lead {}: {}", lead_id, e);
            self.stats.record_write_failure();
        }
    }

    // == Clear ==
    /// Removes one lead's snapshot, or every snapshot this cache owns.
    ///
    /// Keys outside the cache prefix are never touched.
    pub fn clear(&mut self, lead_id: Option<&str>) {
        match lead_id {
            Some(lead_id) if !is_valid_lead_id(lead_id) => {
                warn!("Ignoring preference clear with invalid lead id {:?}", lead_id);
            }
            Some(lead_id) => {
                if let Err(e) = self.storage.remove_item(&storage_key(lead_id)) {
                    warn!("Failed to clear cached preferences for lead {}: {}", lead_id, e);
                }
            }
            None => self.clear_all(),
        }
    }

    fn clear_all(&mut self) {
        let keys = match self.owned_keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to enumerate cached preferences: {}", e);
                return;
            }
        };

        let mut removed = 0;
        for key in keys {
            match self.storage.remove_item(&key) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove cache key {}: {}", key, e),
            }
        }
        debug!("Cleared {} cached lead preference entries", removed);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        if let Ok(keys) = self.owned_keys() {
            stats.cached_leads = keys.len();
        }
        stats
    }

    /// Freshness window in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// The underlying storage substrate.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the storage substrate.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn write(&mut self, lead_id: &str, entry: &CacheEntry) -> Result<(), CacheError> {
        let raw = entry.encode()?;
        self.storage.set_item(&storage_key(lead_id), &raw)?;
        Ok(())
    }

    fn purge(&mut self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            warn!("Failed to purge cache key {}: {}", key, e);
        }
    }

    fn owned_keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .storage
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(KEY_PREFIX))
            .collect())
    }
}

/// Lead ids must contain something other than whitespace.
pub fn is_valid_lead_id(lead_id: &str) -> bool {
    !lead_id.trim().is_empty()
}

fn storage_key(lead_id: &str) -> String {
    format!("{}{}", KEY_PREFIX, lead_id)
}
