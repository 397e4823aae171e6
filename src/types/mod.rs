//! Core data types
//!
//! - `model`: model / sampler / preset enums
//! - `request`: wire payload of the generate-image endpoint
//! - `response`: generated images and metadata
//! - `config`: client and HTTP configuration
//! - `options`: declarative builder overrides

pub mod config;
pub mod model;
pub mod options;
pub mod request;
pub mod response;

pub use config::{ClientConfig, HttpConfig};
pub use model::{ImageModel, NegativePreset, NoiseSchedule, Sampler};
pub use options::ImageGenerationOptions;
pub use request::{Caption, GenerateImagePayload, ImageAction, ImageParameters, V4ConditionInput};
pub use response::{ApiErrorBody, ImageMetadata, ImageResponse};
