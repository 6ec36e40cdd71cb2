//! Data models for the tour session service
//!
//! Lead shapes shared with external collaborators, plus the DTOs used for
//! serializing HTTP response bodies.

pub mod lead;
pub mod responses;

// Re-export commonly used types
pub use lead::{Lead, TouredUnitsUpdate};
pub use responses::{
    ClearResponse, HealthResponse, StatsResponse, TourResponse, UnitStatusResponse,
};
