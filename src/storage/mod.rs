//! Storage Module
//!
//! The object store collaborator the image facade reads from and writes to.
//!
//! # Contents
//! - [`ObjectStore`]: put / get / list capability over a bucket
//! - [`ImagePayload`]: image bytes plus declared content type
//! - [`InMemoryObjectStore`]: bundled backend used by the server and tests

mod memory;
mod payload;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;

pub use memory::{InMemoryObjectStore, RequestCounts};
pub use payload::{ImagePayload, DEFAULT_CONTENT_TYPE};

/// Object storage capability consumed by the image facade.
///
/// Every call may fail; transient failures are reported as
/// [`StorageError::Transient`] and are not retried by callers in this crate.
#[async_trait]
pub trait ObjectStore: std::fmt::Debug + Send + Sync {
    /// Stores `bytes` under `key` and returns the object's public URL.
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str)
        -> Result<String, StorageError>;

    /// Fetches the object stored under `key`.
    async fn get(&self, key: &str) -> Result<ImagePayload, StorageError>;

    /// Lists the URLs of every stored object.
    async fn list(&self) -> Result<Vec<String>, StorageError>;
}
