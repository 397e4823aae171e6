//! HTTP error classification.
//!
//! Maps a non-2xx response onto the [`ImageError`] taxonomy. Kept free of
//! transport types so the table can be tested directly.

use crate::error::ImageError;
use crate::types::ApiErrorBody;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

/// Classify a failed response.
///
/// The message is the body's `message` field, else its `error` field, else
/// the canonical reason of `status`.
pub fn classify_http_error(
    status: u16,
    headers: &HeaderMap,
    body: &[u8],
    correlation_id: &str,
) -> ImageError {
    let raw: Option<serde_json::Value> = serde_json::from_slice(body).ok();
    let parsed: Option<ApiErrorBody> = raw
        .as_ref()
        .and_then(|v| serde_json::from_value(v.clone()).ok());
    let message = parsed
        .as_ref()
        .and_then(ApiErrorBody::best_message)
        .map(str::to_string)
        .unwrap_or_else(|| canonical_reason(status));

    match status {
        400 => ImageError::BadRequest {
            message: format!("Bad request: {message}"),
            details: raw,
        },
        401 | 403 => ImageError::AuthError { status, message },
        402 => ImageError::PaymentRequired { message },
        429 => ImageError::RateLimited {
            message,
            retry_after: parse_retry_after(headers),
        },
        500 | 502 | 503 | 504 => ImageError::ServerError {
            status,
            message: format!(
                "Server error ({status}): {message}. This may be caused by payload schema issues."
            ),
            correlation_id: Some(correlation_id.to_string()),
        },
        _ => ImageError::ApiError {
            status,
            message: format!("HTTP {status}: {message}"),
            details: raw,
        },
    }
}

/// Leading integer seconds of a `retry-after` header. HTTP-date values are
/// not interpreted.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    let digits: &str = &value[..value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len())];
    digits.parse().ok()
}

fn canonical_reason(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}
