//! Type Conversions for ImageError
//!
//! From implementations for the error types of the crates we call into.

use super::types::ImageError;

impl From<reqwest::Error> for ImageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::network_with_cause("Request timed out", &err);
        }
        Self::network_with_cause(format!("Network error: {err}"), &err)
    }
}

impl From<zip::result::ZipError> for ImageError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::DecodeError(format!("Invalid image archive: {err}"))
    }
}

impl From<serde_json::Error> for ImageError {
    fn from(err: serde_json::Error) -> Self {
        Self::ValidationError(format!("Failed to serialize payload: {err}"))
    }
}
