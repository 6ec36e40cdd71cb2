//! API Module
//!
//! HTTP handlers and routing for the tour session REST API.
//!
//! # Endpoints
//! - `GET /leads/:lead_id/preferences` - Read a cached lead snapshot
//! - `PUT /leads/:lead_id/preferences` - Cache a lead snapshot
//! - `DELETE /leads/:lead_id/preferences` - Drop one cached lead
//! - `DELETE /preferences` - Drop every cached lead
//! - `POST /tours/:lead_id` - Start a tour session
//! - `GET /tours/:lead_id` - Current toured-units payload
//! - `DELETE /tours/:lead_id` - End a tour session
//! - `PUT /tours/:lead_id/units/:unit_id` - Mark a unit toured
//! - `DELETE /tours/:lead_id/units/:unit_id` - Unmark a unit
//! - `GET /tours/:lead_id/units/:unit_id` - Query a unit
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
