//! Image Cache - image upload/browse service over object storage
//!
//! Reads go through an in-memory cache with TTL expiration and LRU eviction;
//! uploads and listings go straight to the object store.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;

pub use api::AppState;
pub use config::Config;
pub use service::ImageService;
