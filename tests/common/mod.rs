//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Barrier;

use image_cache::cache::{CacheBackend, CacheStats, CacheStore};
use image_cache::clock::{Clock, MockClock};
use image_cache::error::{CacheError, StorageError};
use image_cache::storage::{ImagePayload, InMemoryObjectStore, ObjectStore};
use image_cache::ImageService;

pub const BUCKET: &str = "test-image-upload-bucket";
pub const REGION: &str = "us-east-1";

pub fn memory_store() -> Arc<InMemoryObjectStore> {
    Arc::new(InMemoryObjectStore::new(BUCKET, REGION))
}

/// Builds a service over `store` whose cache reads time from `clock`.
pub fn service_with_clock(
    store: &Arc<InMemoryObjectStore>,
    capacity: usize,
    ttl_secs: u64,
    clock: &Arc<MockClock>,
) -> ImageService {
    let time_source: Arc<dyn Clock> = Arc::clone(clock) as Arc<dyn Clock>;
    let object_store: Arc<dyn ObjectStore> = Arc::clone(store) as Arc<dyn ObjectStore>;
    ImageService::new(
        object_store,
        CacheStore::with_clock(capacity, ttl_secs, time_source),
    )
}

/// Stores a small PNG-typed object for every key.
pub async fn seed(store: &InMemoryObjectStore, keys: &[String]) {
    for key in keys {
        store
            .put(key, Bytes::from(key.clone().into_bytes()), "image/png")
            .await
            .unwrap();
    }
}

pub fn keys(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}", prefix, i)).collect()
}

// == Broken Cache ==
/// Cache backend whose writes and clears always fail.
#[derive(Debug, Default)]
pub struct BrokenCache {
    /// Also fail lookups instead of reporting a miss
    pub fail_lookups: bool,
}

impl CacheBackend for BrokenCache {
    fn lookup(&mut self, _key: &str) -> Result<Option<ImagePayload>, CacheError> {
        if self.fail_lookups {
            Err(CacheError::Internal("index corrupted".to_string()))
        } else {
            Ok(None)
        }
    }

    fn insert(&mut self, _key: &str, _payload: ImagePayload) -> Result<(), CacheError> {
        Err(CacheError::Internal("out of slots".to_string()))
    }

    fn clear(&mut self) -> Result<usize, CacheError> {
        Err(CacheError::Internal("clear interrupted".to_string()))
    }

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

// == Gated Store ==
/// Object store whose `get` waits until `parties` fetches are in flight.
#[derive(Debug)]
pub struct GatedStore {
    pub inner: InMemoryObjectStore,
    gate: Barrier,
}

impl GatedStore {
    pub fn new(parties: usize) -> Self {
        Self {
            inner: InMemoryObjectStore::new(BUCKET, REGION),
            gate: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl ObjectStore for GatedStore {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.inner.put(key, bytes, content_type).await
    }

    async fn get(&self, key: &str) -> Result<ImagePayload, StorageError> {
        self.gate.wait().await;
        self.inner.get(key).await
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        self.inner.list().await
    }
}
