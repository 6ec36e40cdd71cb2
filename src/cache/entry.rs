//! Cache Entry Module
//!
//! Envelope stored in session storage for one lead's preference snapshot.

use serde::{Deserialize, Serialize};

use crate::models::Lead;

// == Cache Entry ==
/// A lead snapshot plus the time it was written.
///
/// Stored as JSON text: `{"data": {...}, "timestamp": 1700000000000}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached lead snapshot
    pub data: Lead,
    /// Write timestamp (Unix milliseconds)
    pub timestamp: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped at `now_ms`.
    pub fn new(data: Lead, now_ms: u64) -> Self {
        Self {
            data,
            timestamp: now_ms,
        }
    }

    // == Is Expired ==
    /// Checks if the entry is older than `ttl_ms`.
    ///
    /// Boundary condition: an entry exactly `ttl_ms` old is still fresh; it
    /// expires once its age strictly exceeds the TTL. Entries stamped in the
    /// future (clock moved backwards) count as age zero.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }

    /// Milliseconds elapsed since the entry was written.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp)
    }

    // == Time To Live ==
    /// Returns remaining freshness in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64, ttl_ms: u64) -> u64 {
        ttl_ms.saturating_sub(self.age_ms(now_ms))
    }

    // == Encoding ==
    /// Serializes the entry to its stored text form.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses an entry from its stored text form.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
