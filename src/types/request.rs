//! Request payload types for the generate-image endpoint.
//!
//! Field casing is mixed on purpose: the service schema uses camelCase for
//! `qualityToggle` / `ucPreset` and snake_case everywhere else.

use serde::{Deserialize, Serialize};

use super::model::{ImageModel, NegativePreset, NoiseSchedule, Sampler};

/// Base text plus ordered per-character texts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Caption {
    pub base_caption: String,
    pub char_captions: Vec<String>,
}

/// Structured prompt used by both `v4_prompt` and `v4_negative_prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V4ConditionInput {
    pub caption: Caption,
    pub use_coords: bool,
    pub use_order: bool,
    pub legacy_uc: bool,
}

/// The `parameters` block of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageParameters {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub sampler: Sampler,
    pub steps: u32,
    pub n_samples: u32,
    pub seed: u32,
    pub negative_prompt: String,

    pub v4_prompt: V4ConditionInput,
    pub v4_negative_prompt: V4ConditionInput,

    #[serde(rename = "qualityToggle")]
    pub quality_toggle: bool,
    #[serde(rename = "ucPreset")]
    pub uc_preset: NegativePreset,

    pub params_version: u32,
    pub noise_schedule: NoiseSchedule,
    pub sm: bool,
    pub sm_dyn: bool,
    pub dynamic_thresholding: bool,
    pub prefer_brownian: bool,
    pub deliberate_euler_ancestral_bug: bool,
    pub legacy: bool,
    pub legacy_v3_extend: bool,
}

/// The only action this client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAction {
    #[default]
    Generate,
}

/// Root payload posted to `/ai/generate-image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateImagePayload {
    pub input: String,
    pub model: ImageModel,
    pub action: ImageAction,
    pub parameters: ImageParameters,
}
