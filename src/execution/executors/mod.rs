//! Request executors.

pub mod errors;
pub mod image;

pub use errors::{classify_http_error, parse_retry_after};
pub use image::{HttpImageExecutor, ImageExecutor};
