//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use chrono::{DateTime, Duration, Utc};

use crate::storage::ImagePayload;

// == Cache Entry ==
/// A cached image together with the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached image, owned by the cache
    pub payload: ImagePayload,
    /// Insertion timestamp
    pub inserted_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with `now`.
    pub fn new(payload: ImagePayload, now: DateTime<Utc>) -> Self {
        Self {
            payload,
            inserted_at: now,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.inserted_at
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// fresh; it expires once its age is strictly greater than the TTL.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) <= ttl
    }
}
