//! Request DTOs for the image service API
//!
//! Upload bodies are raw image bytes, so the request model is assembled from
//! the path key, the `Content-Type` header and the body.

use bytes::Bytes;

use crate::cache::MAX_KEY_LENGTH;
use crate::storage::DEFAULT_CONTENT_TYPE;

/// Upload of one image (PUT /images/*key)
///
/// # Fields
/// - `key`: The object key to store the image under
/// - `content_type`: Declared content type of the body
/// - `bytes`: The image data
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub key: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadRequest {
    /// Creates a request; a missing or blank content type falls back to
    /// `application/octet-stream`.
    pub fn new(key: impl Into<String>, content_type: Option<&str>, bytes: Bytes) -> Self {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        Self {
            key: key.into(),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.trim().is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        if self.bytes.is_empty() {
            return Some("Image body cannot be empty".to_string());
        }
        None
    }
}
