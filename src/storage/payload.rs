//! Image payload shared between the object store, the cache and callers.

use bytes::Bytes;

/// Content type used when an upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Image bytes with their declared content type.
///
/// `bytes` is an immutable, reference-counted buffer: cloning a payload out of
/// the cache hands the caller a read-only view of the same memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Bytes,
    pub content_type: String,
}

impl ImagePayload {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_clone_shares_buffer() {
        let payload = ImagePayload::new(vec![1u8, 2, 3, 4], "image/png");
        let copy = payload.clone();

        assert_eq!(copy, payload);
        assert_eq!(copy.bytes.as_ptr(), payload.bytes.as_ptr());
        assert_eq!(copy.len(), 4);
        assert!(!copy.is_empty());
    }
}
