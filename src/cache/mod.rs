//! Cache Module
//!
//! Session-scoped lead preference cache with lazy TTL expiry.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{is_valid_lead_id, CacheLookup, PreferenceCache};

// == Public Constants ==
/// Prefix of every storage key owned by the preference cache
pub const KEY_PREFIX: &str = "lead_prefs_";

/// Default freshness window of a cached lead snapshot
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000; // 5 minutes
