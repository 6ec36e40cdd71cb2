//! API Handlers
//!
//! HTTP request handlers for the preference cache and tour session endpoints.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{is_valid_lead_id, PreferenceCache};
use crate::clock::SystemClock;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    ClearResponse, HealthResponse, Lead, StatsResponse, TourResponse, TouredUnitsUpdate,
    UnitStatusResponse,
};
use crate::storage::MemoryStorage;
use crate::tracker::{is_valid_unit_id, TouredUnitsTracker};

/// Application state shared across all handlers.
///
/// The cache and the open tour sessions each sit behind their own lock so
/// every component sees a strictly sequential history.
#[derive(Clone)]
pub struct AppState {
    /// Lead preference cache
    pub cache: Arc<RwLock<PreferenceCache>>,
    /// Open tour sessions keyed by lead id
    pub tours: Arc<RwLock<HashMap<String, TouredUnitsTracker>>>,
}

impl AppState {
    /// Creates a new AppState around the given cache with no open tours.
    pub fn new(cache: PreferenceCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            tours: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses in-memory session storage and the wall clock.
    pub fn from_config(config: &Config) -> Self {
        let storage = MemoryStorage::with_quota(config.storage_quota_bytes);
        let cache = PreferenceCache::with_ttl(storage, Arc::new(SystemClock), config.prefs_ttl_ms);
        Self::new(cache)
    }
}

fn require_lead_id(lead_id: &str) -> Result<()> {
    if is_valid_lead_id(lead_id) {
        Ok(())
    } else {
        Err(ApiError::InvalidRequest("Lead id cannot be empty".to_string()))
    }
}

fn require_unit_id(unit_id: &str) -> Result<()> {
    if is_valid_unit_id(unit_id) {
        Ok(())
    } else {
        Err(ApiError::InvalidRequest("Unit id cannot be empty".to_string()))
    }
}

fn no_tour(lead_id: &str) -> ApiError {
    ApiError::NotFound(format!("No tour session for lead '{}'", lead_id))
}

/// Handler for GET /leads/:lead_id/preferences
pub async fn get_preferences_handler(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
) -> Result<Json<Lead>> {
    require_lead_id(&lead_id)?;

    // Write lock: a lookup may purge expired entries and updates stats
    let mut cache = state.cache.write().await;
    cache
        .get(&lead_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No cached preferences for lead '{}'", lead_id)))
}

/// Handler for PUT /leads/:lead_id/preferences
///
/// The body is the full lead snapshot; its `id` must match the path.
pub async fn put_preferences_handler(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
    Json(lead): Json<Lead>,
) -> Result<Json<Lead>> {
    require_lead_id(&lead_id)?;
    if lead.id != lead_id {
        return Err(ApiError::InvalidRequest(format!(
            "Body lead id '{}' does not match path lead id '{}'",
            lead.id, lead_id
        )));
    }

    let mut cache = state.cache.write().await;
    cache.set(&lead_id, &lead);

    Ok(Json(lead))
}

/// Handler for DELETE /leads/:lead_id/preferences
pub async fn delete_preferences_handler(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
) -> Result<Json<ClearResponse>> {
    require_lead_id(&lead_id)?;

    let mut cache = state.cache.write().await;
    cache.clear(Some(&lead_id));

    Ok(Json(ClearResponse::lead(lead_id)))
}

/// Handler for DELETE /preferences
pub async fn clear_preferences_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    cache.clear(None);

    Json(ClearResponse::all())
}

/// Handler for POST /tours/:lead_id
///
/// Starts (or restarts) a tour session seeded with the lead's persisted
/// toured units.
pub async fn start_tour_handler(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
    Json(seed): Json<TouredUnitsUpdate>,
) -> Result<Json<TourResponse>> {
    require_lead_id(&lead_id)?;

    let tracker = TouredUnitsTracker::initialize(seed.toured_unit_ids);
    let response = TourResponse::new(lead_id.as_str(), &tracker);

    let mut tours = state.tours.write().await;
    if tours.insert(lead_id.clone(), tracker).is_some() {
        info!("Restarted tour session for lead {}", lead_id);
    } else {
        info!("Started tour session for lead {}", lead_id);
    }

    Ok(Json(response))
}

/// Handler for GET /tours/:lead_id
///
/// Returns the update payload for the persistence API.
pub async fn get_tour_handler(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
) -> Result<Json<TourResponse>> {
    let tours = state.tours.read().await;
    let tracker = tours.get(&lead_id).ok_or_else(|| no_tour(&lead_id))?;

    Ok(Json(TourResponse::new(lead_id.as_str(), tracker)))
}

/// Handler for DELETE /tours/:lead_id
///
/// Ends the session and returns its final payload.
pub async fn end_tour_handler(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
) -> Result<Json<TourResponse>> {
    let mut tours = state.tours.write().await;
    let tracker = tours.remove(&lead_id).ok_or_else(|| no_tour(&lead_id))?;
    info!(
        "Ended tour session for lead {} after {} units",
        lead_id,
        tracker.len()
    );

    Ok(Json(TourResponse::new(lead_id, &tracker)))
}

/// Handler for PUT /tours/:lead_id/units/:unit_id
pub async fn add_unit_handler(
    State(state): State<AppState>,
    Path((lead_id, unit_id)): Path<(String, String)>,
) -> Result<Json<TourResponse>> {
    require_unit_id(&unit_id)?;

    let mut tours = state.tours.write().await;
    let tracker = tours.get_mut(&lead_id).ok_or_else(|| no_tour(&lead_id))?;
    tracker.add_unit(&unit_id);

    Ok(Json(TourResponse::new(lead_id.as_str(), tracker)))
}

/// Handler for DELETE /tours/:lead_id/units/:unit_id
pub async fn remove_unit_handler(
    State(state): State<AppState>,
    Path((lead_id, unit_id)): Path<(String, String)>,
) -> Result<Json<TourResponse>> {
    require_unit_id(&unit_id)?;

    let mut tours = state.tours.write().await;
    let tracker = tours.get_mut(&lead_id).ok_or_else(|| no_tour(&lead_id))?;
    tracker.remove_unit(&unit_id);

    Ok(Json(TourResponse::new(lead_id.as_str(), tracker)))
}

/// Handler for GET /tours/:lead_id/units/:unit_id
pub async fn unit_status_handler(
    State(state): State<AppState>,
    Path((lead_id, unit_id)): Path<(String, String)>,
) -> Result<Json<UnitStatusResponse>> {
    let tours = state.tours.read().await;
    let tracker = tours.get(&lead_id).ok_or_else(|| no_tour(&lead_id))?;
    let toured = tracker.is_toured(&unit_id);

    Ok(Json(UnitStatusResponse {
        lead_id,
        unit_id,
        toured,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    let active_tours = state.tours.read().await.len();

    Json(StatsResponse::new(&stats, active_tours))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
