//! Response types.

use serde::{Deserialize, Serialize};

use super::model::{ImageModel, Sampler};
use super::request::GenerateImagePayload;
use crate::utils::encoding;

/// Request parameters echoed next to the generated images.
///
/// Always copied from the submitted payload; the service response carries no
/// metadata of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub seed: u32,
    pub prompt: String,
    pub model: ImageModel,
    pub sampler: Sampler,
    pub steps: u32,
    pub scale: f64,
}

impl From<&GenerateImagePayload> for ImageMetadata {
    fn from(payload: &GenerateImagePayload) -> Self {
        Self {
            seed: payload.parameters.seed,
            prompt: payload.input.clone(),
            model: payload.model,
            sampler: payload.parameters.sampler,
            steps: payload.parameters.steps,
            scale: payload.parameters.scale,
        }
    }
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageResponse {
    /// Encoded image files, one per sample, in archive order.
    pub images: Vec<Vec<u8>>,
    pub metadata: Option<ImageMetadata>,
}

impl ImageResponse {
    /// The first generated image, if any.
    pub fn first(&self) -> Option<&[u8]> {
        self.images.first().map(Vec::as_slice)
    }

    /// Number of images returned.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Every image as a `data:` URL, MIME type sniffed from its bytes.
    pub fn data_urls(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|image| encoding::to_data_url(image, None))
            .collect()
    }
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// `message`, falling back to `error`.
    pub fn best_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}
