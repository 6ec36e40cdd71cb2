//! Error types for the tour session service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Storage Error Enum ==
/// Failures raised by a session storage substrate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backing store cannot be reached or is disabled
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Write would exceed the storage quota
    #[error("Storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },
}

// == Cache Error Enum ==
/// Internal failures of the preference cache.
///
/// These never leave the cache; they are logged and downgraded to a miss
/// or a dropped write.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Malformed cache entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == API Error Enum ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Lead not cached or tour session not started
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
