//! Declarative generation options.

use serde::{Deserialize, Serialize};

use super::model::{ImageModel, NegativePreset, NoiseSchedule, Sampler};

/// Optional overrides applied onto an
/// [`ImageRequestBuilder`](crate::builder::ImageRequestBuilder) in one go,
/// e.g. when parameters come from a config file.
///
/// Unset fields leave the builder untouched. Values go through the same
/// validation as the individual setters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageGenerationOptions {
    pub model: Option<ImageModel>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub prompt: Option<String>,
    pub character_prompts: Option<Vec<String>>,
    pub negative_prompt: Option<String>,
    pub seed: Option<u64>,
    pub steps: Option<u32>,
    pub scale: Option<f64>,
    pub sampler: Option<Sampler>,
    pub uc_preset: Option<NegativePreset>,
    pub quality_toggle: Option<bool>,
    pub smea: Option<bool>,
    pub smea_dyn: Option<bool>,
    pub noise_schedule: Option<NoiseSchedule>,
}
