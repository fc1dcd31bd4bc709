//! In-memory object store
//!
//! Keeps objects in a key-ordered map and hands out bucket-style public URLs.
//! Counts requests per operation and can be switched offline to simulate an
//! outage of the remote service.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::{ImagePayload, ObjectStore};
use crate::error::StorageError;

/// Number of requests served per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestCounts {
    pub put: u64,
    pub get: u64,
    pub list: u64,
}

// == In-Memory Object Store ==
/// Object store that lives entirely in process memory.
#[derive(Debug)]
pub struct InMemoryObjectStore {
    bucket: String,
    region: String,
    objects: RwLock<BTreeMap<String, ImagePayload>>,
    offline: AtomicBool,
    puts: AtomicU64,
    gets: AtomicU64,
    lists: AtomicU64,
}

impl InMemoryObjectStore {
    // == Constructor ==
    /// Creates an empty store for `bucket` in `region`.
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            objects: RwLock::new(BTreeMap::new()),
            offline: AtomicBool::new(false),
            puts: AtomicU64::new(0),
            gets: AtomicU64::new(0),
            lists: AtomicU64::new(0),
        }
    }

    // == Object URL ==
    /// Public URL of the object stored under `key`.
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }

    /// Makes every subsequent request fail with a transient error until
    /// switched back online.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Requests served so far, including failed ones.
    pub fn request_counts(&self) -> RequestCounts {
        RequestCounts {
            put: self.puts.load(Ordering::SeqCst),
            get: self.gets.load(Ordering::SeqCst),
            list: self.lists.load(Ordering::SeqCst),
        }
    }

    fn ensure_online(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Transient(format!(
                "bucket '{}' is unreachable",
                self.bucket
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        if key.is_empty() {
            return Err(StorageError::Permanent("object key cannot be empty".to_string()));
        }

        debug!(key, size = bytes.len(), content_type, "storing object");
        self.objects
            .write()
            .await
            .insert(key.to_string(), ImagePayload::new(bytes, content_type));

        Ok(self.object_url(key))
    }

    async fn get(&self, key: &str) -> Result<ImagePayload, StorageError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        let objects = self.objects.read().await;
        Ok(objects.keys().map(|key| self.object_url(key)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryObjectStore {
        InMemoryObjectStore::new("test-image-upload-bucket", "us-east-1")
    }

    #[tokio::test]
    async fn test_put_returns_bucket_url() {
        let store = store();

        let url = store
            .put("test-upload.jpg", Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();

        assert_eq!(
            url,
            "https://test-image-upload-bucket.s3.us-east-1.amazonaws.com/test-upload.jpg"
        );
    }

    #[tokio::test]
    async fn test_get_returns_stored_payload() {
        let store = store();
        store
            .put("a.png", Bytes::from_static(&[1, 2, 3, 4]), "image/png")
            .await
            .unwrap();

        let payload = store.get("a.png").await.unwrap();
        assert_eq!(payload.bytes.as_ref(), &[1, 2, 3, 4]);
        assert_eq!(payload.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_get_missing_object() {
        let store = store();

        let result = store.get("non-existent.jpg").await;
        assert_eq!(
            result,
            Err(StorageError::NotFound("non-existent.jpg".to_string()))
        );
    }

    #[tokio::test]
    async fn test_list_is_key_ordered() {
        let store = store();
        for key in ["b.png", "a.png", "c.txt"] {
            store
                .put(key, Bytes::from_static(b"x"), "image/png")
                .await
                .unwrap();
        }

        let urls = store.list().await.unwrap();
        assert_eq!(urls.len(), 3);
        assert!(urls[0].ends_with("/a.png"));
        assert!(urls[1].ends_with("/b.png"));
        assert!(urls[2].ends_with("/c.txt"));
    }

    #[tokio::test]
    async fn test_offline_store_fails_transiently() {
        let store = store();
        store.set_offline(true);

        let err = store.get("a.png").await.unwrap_err();
        assert!(err.is_transient());
        assert!(store.list().await.unwrap_err().is_transient());

        store.set_offline(false);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_counts() {
        let store = store();
        store
            .put("a.png", Bytes::from_static(b"x"), "image/png")
            .await
            .unwrap();
        let _ = store.get("a.png").await;
        let _ = store.get("missing.png").await;
        let _ = store.list().await;

        assert_eq!(
            store.request_counts(),
            RequestCounts {
                put: 1,
                get: 2,
                list: 1
            }
        );
    }

    #[tokio::test]
    async fn test_put_rejects_empty_key() {
        let store = store();
        let result = store.put("", Bytes::new(), "image/png").await;
        assert!(matches!(result, Err(StorageError::Permanent(_))));
    }
}
