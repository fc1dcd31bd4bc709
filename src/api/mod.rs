//! API Module
//!
//! HTTP handlers and routing for the image service REST API.
//!
//! # Endpoints
//! - `PUT /images/*key` - Upload an image
//! - `GET /images/*key` - Fetch an image through the cache
//! - `GET /images` - List stored images
//! - `DELETE /cache` - Clear the image cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
