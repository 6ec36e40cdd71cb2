//! Cache Statistics Module
//!
//! Counts lookup outcomes and swallowed failures of the preference cache.

use serde::Serialize;

// == Cache Stats ==
/// Tracks preference cache behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a fresh snapshot
    pub hits: u64,
    /// Lookups that returned nothing, for any reason
    pub misses: u64,
    /// Entries purged because they outlived the TTL
    pub expired: u64,
    /// Entries purged because they failed to parse
    pub corrupt: u64,
    /// Writes dropped because storage or serialization failed
    pub write_failures: u64,
    /// Lead entries currently held in storage
    pub cached_leads: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expired ==
    /// An expired entry is purged and also counts as a miss.
    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.misses += 1;
    }

    // == Record Corrupt ==
    /// A corrupt entry is purged and also counts as a miss.
    pub fn record_corrupt(&mut self) {
        self.corrupt += 1;
        self.misses += 1;
    }

    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }
}
