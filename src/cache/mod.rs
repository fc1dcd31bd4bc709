//! Cache Module
//!
//! Provides the in-memory read-through cache placed in front of object store
//! reads, with TTL expiration and LRU eviction.

mod backend;
mod entry;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use backend::CacheBackend;
pub use entry::CacheEntry;
pub use recency::RecencyMap;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default freshness window in seconds
pub const CACHE_TTL_SECS: u64 = 300;

/// Default maximum number of cached images
pub const MAX_CACHE_SIZE: usize = 100;

/// Maximum allowed key length in bytes (object store key limit)
pub const MAX_KEY_LENGTH: usize = 1024;

/// Maximum size of a single cached payload in bytes
pub const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024; // 10 MB
