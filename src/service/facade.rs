//! Image Service
//!
//! Composes the object store and the cache into a read-through image facade.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheBackend, CacheStats, CacheStore};
use crate::error::{ImageError, Result};
use crate::service::is_image_key;
use crate::storage::{ImagePayload, ObjectStore};

/// Cache statistics plus the remote fetches issued on cache misses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceStats {
    #[serde(flatten)]
    pub cache: CacheStats,
    pub remote_fetches: u64,
}

// == Image Service ==
/// Public surface for uploading, fetching and listing images.
///
/// Owns its cache; nothing is shared between instances. Uploads do not touch
/// the cache, so a read shortly after overwriting a key can return the old
/// image until its cache entry expires.
#[derive(Debug)]
pub struct ImageService {
    store: Arc<dyn ObjectStore>,
    cache: RwLock<Box<dyn CacheBackend>>,
    remote_fetches: AtomicU64,
}

impl ImageService {
    // == Constructor ==
    /// Creates a service reading through `cache` in front of `store`.
    pub fn new(store: Arc<dyn ObjectStore>, cache: CacheStore) -> Self {
        Self::with_backend(store, Box::new(cache))
    }

    /// Creates a service using any cache backend.
    pub fn with_backend(store: Arc<dyn ObjectStore>, cache: Box<dyn CacheBackend>) -> Self {
        Self {
            store,
            cache: RwLock::new(cache),
            remote_fetches: AtomicU64::new(0),
        }
    }

    // == Upload ==
    /// Stores an image and returns its URL.
    ///
    /// Goes straight to the object store; any cached copy of `key` is left
    /// untouched.
    pub async fn upload_image(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String> {
        validate_key(key)?;

        let size = bytes.len();
        match self.store.put(key, bytes, content_type).await {
            Ok(url) => {
                info!(key, size, content_type, "uploaded image");
                Ok(url)
            }
            Err(source) => {
                error!(key, error = %source, "error uploading image");
                Err(ImageError::Upload {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }

    // == Get ==
    /// Returns the image stored under `key`, from the cache when fresh.
    ///
    /// On a miss the object store is queried once and the result cached.
    /// Failing to cache never fails the read; a remote failure is returned as
    /// [`ImageError::Retrieval`] and nothing is cached.
    pub async fn get_image(&self, key: &str) -> Result<ImagePayload> {
        validate_key(key)?;

        let cached = self.cache.write().await.lookup(key);
        match cached {
            Ok(Some(payload)) => return Ok(payload),
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "cache lookup failed, reading from store"),
        }

        // The cache lock is not held across the remote call, so concurrent
        // misses on the same key each fetch and the last insert wins.
        self.remote_fetches.fetch_add(1, Ordering::Relaxed);
        let payload = match self.store.get(key).await {
            Ok(payload) => payload,
            Err(source) => {
                error!(key, error = %source, "error retrieving image");
                return Err(ImageError::Retrieval {
                    key: key.to_string(),
                    source,
                });
            }
        };

        if let Err(e) = self.cache.write().await.insert(key, payload.clone()) {
            warn!(key, error = %e, "failed to cache image");
        } else {
            debug!(key, size = payload.len(), "cached image");
        }

        Ok(payload)
    }

    // == List ==
    /// Lists the URLs of stored images.
    ///
    /// Non-image objects are filtered out. A store failure is logged and
    /// yields an empty list.
    pub async fn list_images(&self) -> Vec<String> {
        match self.store.list().await {
            Ok(urls) => urls.into_iter().filter(|url| is_image_key(url)).collect(),
            Err(e) => {
                warn!(error = %e, "error listing images, returning empty list");
                Vec::new()
            }
        }
    }

    // == Clear Cache ==
    /// Drops every cached image and returns how many were removed.
    pub async fn clear_cache(&self) -> Result<usize> {
        let cleared = self
            .cache
            .write()
            .await
            .clear()
            .map_err(ImageError::CacheClear)?;

        info!(cleared, "cleared image cache");
        Ok(cleared)
    }

    // == Stats ==
    pub async fn stats(&self) -> ServiceStats {
        ServiceStats {
            cache: self.cache.read().await.stats(),
            remote_fetches: self.remote_fetches.load(Ordering::Relaxed),
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(ImageError::InvalidRequest("key cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::InMemoryObjectStore;

    fn service() -> (ImageService, Arc<InMemoryObjectStore>) {
        let store = Arc::new(InMemoryObjectStore::new("test-bucket", "us-east-1"));
        let dyn_store: Arc<dyn ObjectStore> = Arc::clone(&store) as Arc<dyn ObjectStore>;
        (ImageService::new(dyn_store, CacheStore::new(100, 300)), store)
    }

    #[tokio::test]
    async fn test_read_through_fetches_once() {
        let (service, store) = service();
        store
            .put("cat.png", Bytes::from_static(&[1, 2, 3, 4]), "image/png")
            .await
            .unwrap();

        let first = service.get_image("cat.png").await.unwrap();
        let second = service.get_image("cat.png").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.content_type, "image/png");
        assert_eq!(store.request_counts().get, 1);

        let stats = service.stats().await;
        assert_eq!(stats.remote_fetches, 1);
        assert_eq!(stats.cache.hits, 1);
        assert_eq!(stats.cache.misses, 1);
    }

    #[tokio::test]
    async fn test_missing_image_is_not_cached() {
        let (service, store) = service();

        let err = service.get_image("missing.png").await.unwrap_err();
        assert!(matches!(
            err,
            ImageError::Retrieval {
                source: StorageError::NotFound(_),
                ..
            }
        ));

        let _ = service.get_image("missing.png").await;
        assert_eq!(store.request_counts().get, 2);
        assert_eq!(service.stats().await.cache.total_entries, 0);
    }

    #[tokio::test]
    async fn test_upload_bypasses_cache() {
        let (service, store) = service();

        let url = service
            .upload_image("new.png", Bytes::from_static(b"v1"), "image/png")
            .await
            .unwrap();
        assert!(url.ends_with("/new.png"));
        assert_eq!(service.stats().await.cache.total_entries, 0);

        service.get_image("new.png").await.unwrap();

        // Overwrite: the cached copy keeps being served until it expires
        service
            .upload_image("new.png", Bytes::from_static(b"v2"), "image/png")
            .await
            .unwrap();
        let payload = service.get_image("new.png").await.unwrap();
        assert_eq!(payload.bytes.as_ref(), b"v1");
        assert_eq!(store.request_counts().get, 1);
    }

    #[tokio::test]
    async fn test_blank_key_rejected() {
        let (service, store) = service();

        assert!(matches!(
            service.get_image("").await,
            Err(ImageError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.upload_image("", Bytes::new(), "image/png").await,
            Err(ImageError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.get_image("   ").await,
            Err(ImageError::InvalidRequest(_))
        ));
        assert!(matches!(
            service
                .upload_image(" \t", Bytes::from_static(b"x"), "image/png")
                .await,
            Err(ImageError::InvalidRequest(_))
        ));
        assert_eq!(store.request_counts().get, 0);
        assert_eq!(store.request_counts().put, 0);
    }

    #[tokio::test]
    async fn test_list_filters_and_fails_soft() {
        let (service, store) = service();
        for key in ["a.png", "b.JPG", "notes.txt"] {
            store
                .put(key, Bytes::from_static(b"x"), "image/png")
                .await
                .unwrap();
        }

        let images = service.list_images().await;
        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|url| !url.ends_with(".txt")));

        store.set_offline(true);
        assert!(service.list_images().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_cache_twice() {
        let (service, store) = service();
        store
            .put("a.png", Bytes::from_static(b"x"), "image/png")
            .await
            .unwrap();
        service.get_image("a.png").await.unwrap();

        assert_eq!(service.clear_cache().await.unwrap(), 1);
        assert_eq!(service.clear_cache().await.unwrap(), 0);
        assert_eq!(service.stats().await.cache.total_entries, 0);
    }
}
