//! Cache backend trait.

use std::fmt::Debug;

use crate::cache::CacheStats;
use crate::error::CacheError;
use crate::storage::ImagePayload;

/// Storage behind the image facade's read-through cache.
///
/// Errors from `lookup` and `insert` are bookkeeping faults: the facade logs
/// them and degrades to uncached behavior. Errors from `clear` are returned to
/// the caller.
pub trait CacheBackend: Debug + Send + Sync {
    /// Returns the fresh payload cached for `key`, or None on a miss.
    fn lookup(&mut self, key: &str) -> Result<Option<ImagePayload>, CacheError>;

    /// Caches `payload` under `key`, evicting as needed to stay within capacity.
    fn insert(&mut self, key: &str, payload: ImagePayload) -> Result<(), CacheError>;

    /// Drops every entry and returns how many were removed.
    fn clear(&mut self) -> Result<usize, CacheError>;

    /// Current statistics snapshot.
    fn stats(&self) -> CacheStats;
}
