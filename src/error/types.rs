//! Core error types.

use std::time::Duration;
use thiserror::Error;

/// Discriminant of an [`ImageError`], useful for exhaustive matching without
/// destructuring the payload of each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Configuration,
    BadRequest,
    Auth,
    PaymentRequired,
    RateLimited,
    Server,
    Network,
    Api,
    Decode,
}

/// Every failure surfaced by this crate.
///
/// Validation and configuration errors are raised locally before any request
/// is sent. All transport-originated failures are normalized into one of the
/// remaining variants; raw `reqwest` errors never escape the client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    /// A builder constraint was violated before sending.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The client configuration is unusable (empty token, malformed URL, ...).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// HTTP 400: the service rejected the payload.
    #[error("{message}")]
    BadRequest {
        message: String,
        /// Raw error body returned by the service, if any.
        details: Option<serde_json::Value>,
    },

    /// HTTP 401 / 403: the token is invalid, expired or lacks permission.
    #[error("Authentication failed ({status}): {message}")]
    AuthError { status: u16, message: String },

    /// HTTP 402: the account does not have enough Anlas for this generation.
    #[error("Payment required: {message}")]
    PaymentRequired { message: String },

    /// HTTP 429.
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        /// Seconds to wait, parsed from the `retry-after` response header.
        retry_after: Option<u64>,
    },

    /// HTTP 500 / 502 / 503 / 504.
    #[error("{message}")]
    ServerError {
        status: u16,
        message: String,
        /// The `x-correlation-id` sent with the failed request.
        correlation_id: Option<String>,
    },

    /// Timeout, cancellation, connection failure or any unexpected fault.
    #[error("{message}")]
    NetworkError {
        message: String,
        /// Message of the underlying failure.
        cause: Option<String>,
    },

    /// Any other non-2xx status.
    #[error("{message}")]
    ApiError {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// The success body was not a valid image archive.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl ImageError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Create a network error without an underlying cause.
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
            cause: None,
        }
    }

    /// Create a network error wrapping another failure.
    pub fn network_with_cause(message: impl Into<String>, cause: impl ToString) -> Self {
        Self::NetworkError {
            message: message.into(),
            cause: Some(cause.to_string()),
        }
    }

    /// Create a generic API error for an unmapped status.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// The discriminant of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::ConfigurationError(_) => ErrorKind::Configuration,
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::AuthError { .. } => ErrorKind::Auth,
            Self::PaymentRequired { .. } => ErrorKind::PaymentRequired,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::ServerError { .. } => ErrorKind::Server,
            Self::NetworkError { .. } => ErrorKind::Network,
            Self::ApiError { .. } => ErrorKind::Api,
            Self::DecodeError(_) => ErrorKind::Decode,
        }
    }

    /// HTTP status associated with this error, when it came from a response.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::AuthError { status, .. } => Some(*status),
            Self::PaymentRequired { .. } => Some(402),
            Self::RateLimited { .. } => Some(429),
            Self::ServerError { status, .. } | Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError(message)
            | Self::ConfigurationError(message)
            | Self::DecodeError(message) => message,
            Self::BadRequest { message, .. }
            | Self::AuthError { message, .. }
            | Self::PaymentRequired { message }
            | Self::RateLimited { message, .. }
            | Self::ServerError { message, .. }
            | Self::NetworkError { message, .. }
            | Self::ApiError { message, .. } => message,
        }
    }

    /// Raw diagnostic payload returned by the service.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::BadRequest { details, .. } | Self::ApiError { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Server-suggested wait before retrying, only set for rate limits.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => retry_after.map(Duration::from_secs),
            _ => None,
        }
    }

    /// Correlation id of the failed request, only set for server errors.
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            Self::ServerError { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }

    /// Whether a caller-driven retry may succeed. The client never retries
    /// on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::ServerError { .. } | Self::NetworkError { .. } => {
                true
            }
            Self::ApiError { status, .. } => *status == 408 || (500..=599).contains(status),
            _ => false,
        }
    }

    /// Errors raised before anything was sent over the network.
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::ConfigurationError(_)
        )
    }
}
