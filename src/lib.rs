//! # novelai-image
//!
//! Client for the NovelAI image generation API.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Fluent Requests**: chain setters on an [`ImageRequestBuilder`], then `generate()`.
//! - **Local Validation**: resolution, steps, scale, seed and batch size are checked before anything is sent.
//! - **Multi-Character Prompts**: per-character prompts and negatives are emitted in the V4 caption layout.
//! - **Typed Errors**: every failure is an [`ImageError`] variant with status, retry hint and correlation id where relevant.
//! - **Pluggable Plumbing**: custom [`HttpTransport`], archive backend and entropy sources can be injected.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use novelai_image::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NovelAiClient::from_env()?;
//!
//!     let response = client
//!         .image()
//!         .set_prompt("1girl, cherry blossoms, night")
//!         .set_negative_prompt("lowres, blurry")
//!         .set_size(832, 1216)?
//!         .generate()
//!         .await?;
//!
//!     if let Some(png) = response.first() {
//!         std::fs::write("out.png", png)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events under the `novelai_image` target and
//! never installs a subscriber. Tokens are never logged.

pub mod builder;
pub mod client;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod params;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::ImageRequestBuilder;
pub use client::{NovelAiClient, NovelAiClientBuilder};
pub use error::{ErrorKind, ImageError, Result};
pub use execution::{
    HttpImageExecutor, HttpTransport, HttpTransportRequest, HttpTransportResponse, ImageExecutor,
    ReqwestTransport,
};
pub use types::{
    ClientConfig, GenerateImagePayload, HttpConfig, ImageGenerationOptions, ImageMetadata,
    ImageModel, ImageResponse, NegativePreset, NoiseSchedule, Sampler,
};
pub use utils::cancel::CancelHandle;

/// Commonly used items.
pub mod prelude {
    pub use crate::builder::ImageRequestBuilder;
    pub use crate::client::{NovelAiClient, NovelAiClientBuilder};
    pub use crate::error::{ErrorKind, ImageError};
    pub use crate::params::{PromptWarning, check_prompt_length};
    pub use crate::types::{
        ClientConfig, ImageGenerationOptions, ImageModel, ImageResponse, NegativePreset,
        NoiseSchedule, Sampler,
    };
    pub use crate::utils::cancel::CancelHandle;
}
