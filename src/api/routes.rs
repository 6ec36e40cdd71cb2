//! API Routes
//!
//! Configures the Axum router with all tour session endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_unit_handler, clear_preferences_handler, delete_preferences_handler, end_tour_handler,
    get_preferences_handler, get_tour_handler, health_handler, put_preferences_handler,
    remove_unit_handler, start_tour_handler, stats_handler, unit_status_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|PUT|DELETE /leads/:lead_id/preferences` - Cached lead snapshot
/// - `DELETE /preferences` - Clear every cached lead
/// - `POST|GET|DELETE /tours/:lead_id` - Tour session lifecycle
/// - `PUT|DELETE|GET /tours/:lead_id/units/:unit_id` - Toured unit membership
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, since the UI is served separately
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/leads/:lead_id/preferences",
            get(get_preferences_handler)
                .put(put_preferences_handler)
                .delete(delete_preferences_handler),
        )
        .route("/preferences", delete(clear_preferences_handler))
        .route(
            "/tours/:lead_id",
            get(get_tour_handler)
                .post(start_tour_handler)
                .delete(end_tour_handler),
        )
        .route(
            "/tours/:lead_id/units/:unit_id",
            get(unit_status_handler)
                .put(add_unit_handler)
                .delete(remove_unit_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
