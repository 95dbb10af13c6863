//! Error taxonomy for the HTTP layer

use crate::store::StoreError;
use thiserror::Error;
use warp::http::StatusCode;

/// Result type for request handling
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors a request can fail with
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request fields
    #[error("{0}")]
    InvalidInput(String),

    /// A referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Storage or runtime failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// `NotFound` for the given entity, e.g. "Model not found"
    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(format!("{} not found", entity))
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // Unique violations are schema validation failures, not outages
            ApiError::Store(StoreError::Conflict(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl warp::reject::Reject for ApiError {}
