//! Error types for the image service
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
/// Failures reported by the object store collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No object is stored under the key
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Temporary failure (network, throttling); the caller may retry
    #[error("Transient storage failure: {0}")]
    Transient(String),

    /// Failure that will not go away on retry (auth, bad request)
    #[error("Storage failure: {0}")]
    Permanent(String),
}

impl StorageError {
    /// Returns true when retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Transient(_))
    }
}

// == Cache Error Enum ==
/// Bookkeeping faults inside a cache store.
///
/// These never reach callers of [`crate::service::ImageService::get_image`];
/// the facade logs them and carries on without the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key is empty or too long to be cached
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Payload exceeds the per-entry size limit
    #[error("Payload for '{key}' is {size} bytes, limit is {max} bytes")]
    PayloadTooLarge { key: String, size: usize, max: usize },

    /// Any other internal fault
    #[error("Internal cache error: {0}")]
    Internal(String),
}

// == Image Error Enum ==
/// Errors surfaced by the image facade.
#[derive(Error, Debug)]
pub enum ImageError {
    /// Upload to the object store failed
    #[error("Failed to upload image '{key}': {source}")]
    Upload {
        key: String,
        #[source]
        source: StorageError,
    },

    /// Fetch from the object store failed on a cache miss
    #[error("Failed to retrieve image '{key}': {source}")]
    Retrieval {
        key: String,
        #[source]
        source: StorageError,
    },

    /// Explicit cache clear failed
    #[error("Failed to clear cache: {0}")]
    CacheClear(#[source] CacheError),

    /// Request rejected before any work was done
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ImageError {
    fn into_response(self) -> Response {
        let status = match &self {
            ImageError::Retrieval {
                source: StorageError::NotFound(_),
                ..
            } => StatusCode::NOT_FOUND,
            ImageError::Upload { source, .. } | ImageError::Retrieval { source, .. } => {
                if source.is_transient() {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::BAD_GATEWAY
                }
            }
            ImageError::CacheClear(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ImageError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the image facade.
pub type Result<T> = std::result::Result<T, ImageError>;
