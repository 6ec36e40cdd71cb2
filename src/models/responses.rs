//! Response DTOs for the tour session API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::tracker::TouredUnitsTracker;

/// Response body for tour session endpoints (`/tours/:lead_id`)
#[derive(Debug, Clone, Serialize)]
pub struct TourResponse {
    /// Lead the session belongs to
    pub lead_id: String,
    /// Toured units in insertion order
    pub toured_unit_ids: Vec<String>,
}

impl TourResponse {
    /// Snapshots a tracker into a response
    pub fn new(lead_id: impl Into<String>, tracker: &TouredUnitsTracker) -> Self {
        Self {
            lead_id: lead_id.into(),
            toured_unit_ids: tracker.update_payload().toured_unit_ids,
        }
    }
}

/// Response body for a unit membership query
#[derive(Debug, Clone, Serialize)]
pub struct UnitStatusResponse {
    pub lead_id: String,
    pub unit_id: String,
    pub toured: bool,
}

/// Response body for preference clearing endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Lead that was cleared, absent for a global clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
}

impl ClearResponse {
    /// Response for clearing a single lead
    pub fn lead(lead_id: impl Into<String>) -> Self {
        let lead_id = lead_id.into();
        Self {
            message: format!("Preferences for lead '{}' cleared", lead_id),
            lead_id: Some(lead_id),
        }
    }

    /// Response for clearing every cached lead
    pub fn all() -> Self {
        Self {
            message: "All cached preferences cleared".to_string(),
            lead_id: None,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub corrupt: u64,
    pub write_failures: u64,
    /// Leads currently held in storage
    pub cached_leads: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Tour sessions currently open
    pub active_tours: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, active_tours: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            corrupt: stats.corrupt,
            write_failures: stats.write_failures,
            cached_leads: stats.cached_leads,
            hit_rate: stats.hit_rate(),
            active_tours,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
