//! Cache Store Module
//!
//! Main cache engine: a recency-ordered map of image payloads with lazy TTL
//! expiration and bounded-size LRU eviction.

use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use crate::cache::{
    CacheBackend, CacheEntry, CacheStats, RecencyMap, MAX_KEY_LENGTH, MAX_PAYLOAD_SIZE,
};
use crate::clock::{Clock, SystemClock};
use crate::error::CacheError;
use crate::storage::ImagePayload;

// == Cache Store ==
/// In-memory image cache with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Cached entries, least recently touched first
    entries: RecencyMap<CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed; zero disables caching
    max_entries: usize,
    /// Freshness window
    ttl: Duration,
    /// Time source for stamping and aging entries
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `ttl_secs` - Seconds an entry stays fresh after insertion
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self::with_clock(max_entries, ttl_secs, Arc::new(SystemClock::new()))
    }

    /// Creates a new CacheStore that reads time from `clock`.
    pub fn with_clock(max_entries: usize, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            entries: RecencyMap::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
            clock,
        }
    }

    // == Lookup ==
    /// Returns the cached payload for `key` if present and fresh.
    ///
    /// A hit moves the key to the most recently touched position. An expired
    /// entry is removed and reported as a miss.
    pub fn lookup(&mut self, key: &str) -> Option<ImagePayload> {
        let now = self.clock.now();

        let fresh = match self.entries.get(key) {
            Some(entry) => entry.is_fresh(now, self.ttl),
            None => {
                self.stats.record_miss();
                debug!(key, "cache miss");
                return None;
            }
        };

        if !fresh {
            self.entries.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "cache entry expired");
            return None;
        }

        let payload = self.entries.touch(key).map(|entry| entry.payload.clone());
        self.stats.record_hit();
        debug!(key, "cache hit");
        payload
    }

    // == Insert ==
    /// Stores `payload` under `key`, stamped with the current time.
    ///
    /// Any previous entry for the key is replaced and its old position in the
    /// recency order dropped. While the cache is at capacity, the least
    /// recently touched entries are evicted.
    pub fn insert(&mut self, key: &str, payload: ImagePayload) -> Result<(), CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
        }

        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(CacheError::PayloadTooLarge {
                key: key.to_string(),
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }

        if self.max_entries == 0 {
            return Ok(());
        }

        // Re-insertion must not leave a stale position behind
        self.entries.remove(key);

        while self.entries.len() >= self.max_entries {
            match self.entries.pop_oldest() {
                Some((evicted, _)) => {
                    self.stats.record_eviction();
                    debug!(key = %evicted, "evicted least recently used entry");
                }
                None => break,
            }
        }

        let entry = CacheEntry::new(payload, self.clock.now());
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Clear ==
    /// Removes every entry. Returns the number of entries removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.clear();
        self.stats.set_total_entries(0);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys in eviction order, least recently touched first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys()
    }

    /// Returns true if `key` has an entry, fresh or not, without touching it.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheBackend for CacheStore {
    fn lookup(&mut self, key: &str) -> Result<Option<ImagePayload>, CacheError> {
        Ok(CacheStore::lookup(self, key))
    }

    fn insert(&mut self, key: &str, payload: ImagePayload) -> Result<(), CacheError> {
        CacheStore::insert(self, key, payload)
    }

    fn clear(&mut self) -> Result<usize, CacheError> {
        Ok(CacheStore::clear(self))
    }

    fn stats(&self) -> CacheStats {
        CacheStore::stats(self)
    }
}
