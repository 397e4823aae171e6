//! Model, sampler and preset enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported image generation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageModel {
    /// V4.5 Full, newest full-capability model with multi-character support.
    #[default]
    #[serde(rename = "nai-diffusion-4-5-full")]
    V45Full,
    /// V4 Curated, more conservative aesthetic choices.
    #[serde(rename = "nai-diffusion-4-curated")]
    V4Curated,
    /// V4 Inpainting, for image editing tasks.
    #[serde(rename = "nai-diffusion-4-inpainting")]
    Inpainting,
}

impl ImageModel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V45Full => "nai-diffusion-4-5-full",
            Self::V4Curated => "nai-diffusion-4-curated",
            Self::Inpainting => "nai-diffusion-4-inpainting",
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sampler {
    #[serde(rename = "k_euler")]
    Euler,
    /// Euler Ancestral, recommended for anime-style generations.
    #[default]
    #[serde(rename = "k_euler_ancestral")]
    EulerAncestral,
    /// DPM++ 2M
    #[serde(rename = "k_dpmpp_2m")]
    Dpm2M,
    /// DPM++ 2S Ancestral
    #[serde(rename = "k_dpmpp_2s_ancestral")]
    Dpm2SAncestral,
    /// DPM++ SDE
    #[serde(rename = "k_dpmpp_sde")]
    DpmSde,
    #[serde(rename = "ddim_v3")]
    Ddim,
}

impl Sampler {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Euler => "k_euler",
            Self::EulerAncestral => "k_euler_ancestral",
            Self::Dpm2M => "k_dpmpp_2m",
            Self::Dpm2SAncestral => "k_dpmpp_2s_ancestral",
            Self::DpmSde => "k_dpmpp_sde",
            Self::Ddim => "ddim_v3",
        }
    }
}

impl fmt::Display for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preset undesired-content filters, sent as `ucPreset` (0, 1 or 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum NegativePreset {
    /// Low quality + bad anatomy.
    #[default]
    Heavy,
    /// Low quality only.
    Light,
    /// Custom negative prompt only.
    None,
}

impl From<NegativePreset> for u8 {
    fn from(preset: NegativePreset) -> Self {
        match preset {
            NegativePreset::Heavy => 0,
            NegativePreset::Light => 1,
            NegativePreset::None => 2,
        }
    }
}

impl TryFrom<u8> for NegativePreset {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Heavy),
            1 => Ok(Self::Light),
            2 => Ok(Self::None),
            other => Err(format!("unknown ucPreset {other}")),
        }
    }
}

/// Noise schedule algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseSchedule {
    Native,
    #[default]
    Karras,
    Exponential,
    Polyexponential,
}

impl NoiseSchedule {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Karras => "karras",
            Self::Exponential => "exponential",
            Self::Polyexponential => "polyexponential",
        }
    }
}

impl fmt::Display for NoiseSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
