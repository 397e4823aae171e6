//! Execution layer
//!
//! Everything between a built [`crate::types::GenerateImagePayload`] and the
//! decoded [`crate::types::ImageResponse`]: header construction, the
//! transport seam, deadline/cancellation handling and status classification.

pub mod executors;
pub mod http;

pub use executors::{HttpImageExecutor, ImageExecutor};
pub use http::{HttpTransport, HttpTransportRequest, HttpTransportResponse, ReqwestTransport};
