//! User-facing error helpers.
//!
//! Structured summaries and fix suggestions suitable for CLI/UI rendering.

use super::types::{ErrorKind, ImageError};

/// Structured error summary for CLI/UI consumption.
#[derive(Debug, Clone)]
pub struct ErrorSummary {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
    pub retryable: bool,
    pub suggestions: Vec<String>,
    pub details: Option<serde_json::Value>,
}

/// Summarize an error with friendly suggestions.
pub fn summarize_error(err: &ImageError) -> ErrorSummary {
    ErrorSummary {
        kind: err.kind(),
        status: err.status_code(),
        message: err.message().to_string(),
        retryable: err.is_retryable(),
        suggestions: suggest_fixes(err),
        details: err.details().cloned(),
    }
}

/// Suggest fixes based on the error kind.
pub fn suggest_fixes(err: &ImageError) -> Vec<String> {
    let mut tips = Vec::new();
    match err.kind() {
        ErrorKind::Validation => {
            tips.push("Check size (multiples of 64), steps (1-50) and scale (0-10)".to_string());
        }
        ErrorKind::Configuration => {
            tips.push("Check NOVELAI_TOKEN and the configured base URL".to_string());
        }
        ErrorKind::BadRequest => {
            tips.push("The service rejected the payload; inspect the error details".to_string());
        }
        ErrorKind::Auth => {
            tips.push("Verify your persistent API token (pst-...)".to_string());
        }
        ErrorKind::PaymentRequired => {
            tips.push("Top up Anlas or lower batch size / resolution".to_string());
        }
        ErrorKind::RateLimited => match err.retry_after() {
            Some(wait) => tips.push(format!("Wait {}s before retrying", wait.as_secs())),
            None => tips.push("Wait and retry with backoff".to_string()),
        },
        ErrorKind::Server => {
            tips.push("Retry with backoff".to_string());
            if let Some(id) = err.correlation_id() {
                tips.push(format!("Quote correlation id {id} when reporting the failure"));
            }
        }
        ErrorKind::Network => {
            tips.push("Check connectivity or raise the client timeout".to_string());
        }
        ErrorKind::Decode => {
            tips.push("The response was not a valid archive; report it to the service".to_string());
        }
        ErrorKind::Api => {}
    }
    tips
}

/// Render a CLI-friendly string for an ErrorSummary.
pub fn format_summary(summary: &ErrorSummary, verbose: bool) -> String {
    let mut out = String::new();
    if let Some(code) = summary.status {
        out.push_str(&format!("Status: {code}\n"));
    }
    out.push_str(&format!("Message: {}\n", summary.message));
    if !summary.suggestions.is_empty() {
        out.push_str("Suggestions:\n");
        for s in &summary.suggestions {
            out.push_str(&format!("  - {s}\n"));
        }
    }
    if verbose && let Some(details) = &summary.details {
        out.push_str(&format!("Details: {details}\n"));
    }
    out
}
