//! Response DTOs for the image service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::service::ServiceStats;

/// Response body for an upload (PUT /images/*key)
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// The key the image was stored under
    pub key: String,
    /// Public URL of the stored image
    pub url: String,
}

impl UploadResponse {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }
}

/// Response body for the listing (GET /images)
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    /// URLs of stored images
    pub images: Vec<String>,
    /// Number of images listed
    pub count: usize,
}

impl ListResponse {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            count: images.len(),
            images,
        }
    }
}

/// Response body for clearing the cache (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of cached images dropped
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached image(s)", cleared),
            cleared,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses (including expired entries)
    pub misses: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Number of entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Current number of cached images
    pub total_entries: usize,
    /// Fetches sent to the object store on cache misses
    pub remote_fetches: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<ServiceStats> for StatsResponse {
    fn from(stats: ServiceStats) -> Self {
        Self {
            hit_rate: stats.cache.hit_rate(),
            hits: stats.cache.hits,
            misses: stats.cache.misses,
            evictions: stats.cache.evictions,
            expirations: stats.cache.expirations,
            total_entries: stats.cache.total_entries,
            remote_fetches: stats.remote_fetches,
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
