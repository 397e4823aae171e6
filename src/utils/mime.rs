//! MIME type detection utilities

/// Fallback for images the sniffer does not recognise; the service returns PNG.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes).map(|k| k.mime_type())
}

/// Sniffed MIME type of an image buffer, PNG when unknown.
pub fn image_mime(bytes: &[u8]) -> &'static str {
    guess_mime_from_bytes(bytes)
        .filter(|m| m.starts_with("image/"))
        .unwrap_or(DEFAULT_IMAGE_MIME)
}
