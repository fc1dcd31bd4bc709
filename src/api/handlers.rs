//! API Handlers
//!
//! HTTP request handlers for each image service endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::CacheStore;
use crate::error::{ImageError, Result};
use crate::models::{
    ClearResponse, HealthResponse, ListResponse, StatsResponse, UploadRequest, UploadResponse,
};
use crate::service::ImageService;
use crate::storage::{InMemoryObjectStore, ObjectStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The image facade
    pub service: Arc<ImageService>,
    /// Largest accepted upload body in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Creates a new AppState around an image service.
    pub fn new(service: ImageService) -> Self {
        Self {
            service: Arc::new(service),
            max_upload_bytes: crate::config::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Backs the service with an in-memory object store for the configured
    /// bucket and a cache sized from the Config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemoryObjectStore::new(
            config.bucket_name.clone(),
            config.region.clone(),
        ));
        let cache = CacheStore::new(config.max_cache_size, config.cache_ttl);

        Self {
            service: Arc::new(ImageService::new(store, cache)),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

/// Handler for PUT /images/*key
///
/// Stores the request body as an image under `key`.
pub async fn upload_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let req = UploadRequest::new(key, content_type, body);

    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(ImageError::InvalidRequest(error_msg));
    }

    let url = state
        .service
        .upload_image(&req.key, req.bytes, &req.content_type)
        .await?;

    Ok(Json(UploadResponse::new(req.key, url)))
}

/// Handler for GET /images/*key
///
/// Returns the raw image with its stored content type.
pub async fn get_image_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    let payload = state.service.get_image(&key).await?;

    Ok(([(header::CONTENT_TYPE, payload.content_type)], payload.bytes).into_response())
}

/// Handler for GET /images
///
/// Lists stored images; an unreachable store yields an empty list.
pub async fn list_handler(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse::new(state.service.list_images().await))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let cleared = state.service.clear_cache().await?;
    Ok(Json(ClearResponse::new(cleared)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.service.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
