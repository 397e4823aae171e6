//! Error Handling Module
//!
//! - Core error type (`ImageError`) and its discriminant (`ErrorKind`)
//! - User-facing summaries and suggestions
//! - Conversions from the errors of the underlying crates
//!
//! # Example
//!
//! ```rust,ignore
//! use novelai_image::error::{ErrorKind, ImageError};
//!
//! let error = ImageError::api_error(404, "Not found");
//! assert_eq!(error.kind(), ErrorKind::Api);
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod helpers;
pub mod types;

pub use helpers::*;
pub use types::*;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ImageError>;
