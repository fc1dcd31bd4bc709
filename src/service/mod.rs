//! Service Module
//!
//! The image access facade: read-through retrieval over the object store,
//! plus uploads, listing and cache management.

mod facade;
mod filter;

pub use facade::{ImageService, ServiceStats};
pub use filter::{is_image_key, IMAGE_EXTENSIONS};
