//! Default values and protocol constants.

use std::time::Duration;

/// Base URL of the image API.
pub const DEFAULT_BASE_URL: &str = "https://image.novelai.net";

/// Path of the generation endpoint under the base URL.
pub const GENERATE_ENDPOINT: &str = "/ai/generate-image";

/// Default whole-exchange timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Default whole-exchange timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// Content types the client accepts; the service picks one.
pub const ACCEPT_HEADER_VALUE: &str = "application/x-zip-compressed, application/json";

/// Header carrying the per-request correlation id.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Length of generated correlation ids.
pub const CORRELATION_ID_LEN: usize = 6;

/// Soft limit used by prompt length hints.
pub const DEFAULT_PROMPT_LIMIT: usize = 2000;

/// File extension of image entries inside the response archive.
pub const IMAGE_ENTRY_EXTENSION: &str = ".png";

/// Builder defaults.
pub mod generation {
    pub const WIDTH: u32 = 832;
    pub const HEIGHT: u32 = 1216;
    pub const STEPS: u32 = 23;
    pub const SCALE: f64 = 5.0;
    pub const BATCH_SIZE: u32 = 1;

    pub const MIN_STEPS: u32 = 1;
    pub const MAX_STEPS: u32 = 50;
    pub const MIN_SCALE: f64 = 0.0;
    pub const MAX_SCALE: f64 = 10.0;
    pub const RESOLUTION_STEP: u32 = 64;
}

/// Fixed protocol values of the current payload schema.
pub mod protocol {
    pub const PARAMS_VERSION: u32 = 3;
    pub const PREFER_BROWNIAN: bool = true;
    pub const DELIBERATE_EULER_ANCESTRAL_BUG: bool = true;
    pub const LEGACY: bool = false;
    pub const LEGACY_V3_EXTEND: bool = false;
    pub const USE_COORDS: bool = false;
    pub const USE_ORDER: bool = true;
    pub const LEGACY_UC: bool = false;
    /// Separator joining the base prompt and character prompts into `input`.
    pub const CHARACTER_SEPARATOR: &str = " | ";
}

/// Environment variables read by `ClientConfig::from_env`.
pub mod env {
    pub const TOKEN: &str = "NOVELAI_TOKEN";
    pub const BASE_URL: &str = "NOVELAI_BASE_URL";
    pub const TIMEOUT_MS: &str = "NOVELAI_TIMEOUT_MS";
}
