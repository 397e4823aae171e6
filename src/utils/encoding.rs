//! Base64 and data URL helpers for displaying generated images.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::mime;

/// Standard (padded) base64 of a buffer.
pub fn to_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// `data:` URL usable directly as an `<img src>`.
///
/// When `mime_type` is `None` the type is sniffed from the bytes.
pub fn to_data_url(data: &[u8], mime_type: Option<&str>) -> String {
    let mime_type = mime_type.unwrap_or_else(|| mime::image_mime(data));
    format!("data:{mime_type};base64,{}", to_base64(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_roundtrips_known_value() {
        assert_eq!(to_base64(b"hello"), "aGVsbG8=");
        assert_eq!(to_base64(&[]), "");
    }

    #[test]
    fn data_url_uses_explicit_mime() {
        assert_eq!(
            to_data_url(b"hello", Some("image/webp")),
            "data:image/webp;base64,aGVsbG8="
        );
    }

    #[test]
    fn data_url_defaults_to_png() {
        assert_eq!(to_data_url(&[1, 2, 3], None), "data:image/png;base64,AQID");
    }
}
