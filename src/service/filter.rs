//! Image file recognition for listings.

/// File extensions treated as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Returns true if the object key or URL names an image file.
///
/// Only the last path segment is inspected, with any query string or fragment
/// stripped first.
pub fn is_image_key(key_or_url: &str) -> bool {
    let path = key_or_url
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let file_name = path.rsplit('/').next().unwrap_or_default();

    match file_name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}
