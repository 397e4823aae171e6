//! Image Request Builder
//!
//! Accumulates generation parameters through chained mutators and projects
//! them into a [`GenerateImagePayload`].
//!
//! The builder is a single-owner value: every mutator consumes it and hands
//! it back, so no two references to the same state can exist. Mutators that
//! check their input return `Result<Self, ImageError>` and leave nothing
//! half-applied on failure.
//!
//! # Example
//! ```rust,no_run
//! use novelai_image::prelude::*;
//!
//! # async fn run(client: NovelAiClient) -> Result<(), ImageError> {
//! let response = client
//!     .image()
//!     .set_prompt("1girl, lighthouse, sunset")
//!     .add_character("girl, red scarf")
//!     .set_size(1024, 1024)?
//!     .set_steps(28)?
//!     .enable_smea(true)
//!     .generate()
//!     .await?;
//! println!("{} image(s)", response.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::defaults::{generation, protocol};
use crate::error::ImageError;
use crate::execution::ImageExecutor;
use crate::params::{self, PromptWarning};
use crate::types::{
    Caption, GenerateImagePayload, ImageAction, ImageGenerationOptions, ImageModel,
    ImageParameters, ImageResponse, NegativePreset, NoiseSchedule, Sampler, V4ConditionInput,
};
use crate::utils::cancel::CancelHandle;
use crate::utils::entropy::SeedSource;

/// Fluent builder for one image generation request.
pub struct ImageRequestBuilder {
    executor: Arc<dyn ImageExecutor>,

    model: ImageModel,
    width: u32,
    height: u32,
    prompt: String,
    character_prompts: Vec<String>,
    negative_prompt: String,
    character_negative_prompts: Vec<String>,
    seed: u32,
    steps: u32,
    scale: f64,
    n_samples: u32,
    sampler: Sampler,
    uc_preset: NegativePreset,
    quality_toggle: bool,
    smea: bool,
    smea_dyn: bool,
    dynamic_thresholding: bool,
    noise_schedule: NoiseSchedule,
}

impl ImageRequestBuilder {
    /// Create a builder with default parameters. The seed is drawn from
    /// `seeds` once, here.
    pub fn new(executor: Arc<dyn ImageExecutor>, seeds: &dyn SeedSource) -> Self {
        Self {
            executor,
            model: ImageModel::default(),
            width: generation::WIDTH,
            height: generation::HEIGHT,
            prompt: String::new(),
            character_prompts: Vec::new(),
            negative_prompt: String::new(),
            character_negative_prompts: Vec::new(),
            seed: seeds.next_seed(),
            steps: generation::STEPS,
            scale: generation::SCALE,
            n_samples: generation::BATCH_SIZE,
            sampler: Sampler::default(),
            uc_preset: NegativePreset::default(),
            quality_toggle: true,
            smea: false,
            smea_dyn: false,
            dynamic_thresholding: false,
            noise_schedule: NoiseSchedule::default(),
        }
    }

    pub fn set_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    /// Set the output dimensions; both must be multiples of 64.
    pub fn set_size(mut self, width: u32, height: u32) -> Result<Self, ImageError> {
        params::validate_resolution(width, height)?;
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Set the base prompt. Character prompts are kept.
    pub fn set_prompt(mut self, base: impl Into<String>) -> Self {
        self.prompt = base.into();
        self
    }

    /// Set the base prompt and replace all character prompts.
    pub fn set_prompt_with_characters<I, S>(mut self, base: impl Into<String>, characters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt = base.into();
        self.character_prompts = characters.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_character(mut self, character_prompt: impl Into<String>) -> Self {
        self.character_prompts.push(character_prompt.into());
        self
    }

    /// Set the base negative prompt. Per-character negatives are kept.
    pub fn set_negative_prompt(mut self, base: impl Into<String>) -> Self {
        self.negative_prompt = base.into();
        self
    }

    /// Set the base negative prompt and replace all per-character negatives.
    pub fn set_negative_prompt_with_characters<I, S>(
        mut self,
        base: impl Into<String>,
        character_negatives: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.negative_prompt = base.into();
        self.character_negative_prompts = character_negatives.into_iter().map(Into::into).collect();
        self
    }

    /// Add a per-character negative prompt, positionally matching
    /// [`Self::add_character`].
    pub fn add_character_negative(mut self, negative_prompt: impl Into<String>) -> Self {
        self.character_negative_prompts.push(negative_prompt.into());
        self
    }

    pub fn set_seed(mut self, seed: u64) -> Result<Self, ImageError> {
        params::validate_seed(seed)?;
        self.seed = u32::try_from(seed).map_err(|e| ImageError::validation(e.to_string()))?;
        Ok(self)
    }

    pub fn set_steps(mut self, steps: u32) -> Result<Self, ImageError> {
        params::validate_steps(steps)?;
        self.steps = steps;
        Ok(self)
    }

    /// Set the classifier-free guidance scale.
    pub fn set_cfg_scale(mut self, scale: f64) -> Result<Self, ImageError> {
        params::validate_scale(scale)?;
        self.scale = scale;
        Ok(self)
    }

    /// Number of images per request. Each sample costs Anlas.
    pub fn set_batch_size(mut self, count: u32) -> Result<Self, ImageError> {
        params::validate_batch_size(count)?;
        self.n_samples = count;
        Ok(self)
    }

    pub fn set_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn set_negative_preset(mut self, preset: NegativePreset) -> Self {
        self.uc_preset = preset;
        self
    }

    pub fn enable_auto_quality_tags(mut self, enabled: bool) -> Self {
        self.quality_toggle = enabled;
        self
    }

    /// Enable SMEA, optionally in its dynamic variant.
    pub fn enable_smea(mut self, dynamic: bool) -> Self {
        self.smea = true;
        self.smea_dyn = dynamic;
        self
    }

    pub fn disable_smea(mut self) -> Self {
        self.smea = false;
        self.smea_dyn = false;
        self
    }

    pub fn set_noise_schedule(mut self, schedule: NoiseSchedule) -> Self {
        self.noise_schedule = schedule;
        self
    }

    pub fn enable_dynamic_thresholding(mut self) -> Self {
        self.dynamic_thresholding = true;
        self
    }

    pub fn disable_dynamic_thresholding(mut self) -> Self {
        self.dynamic_thresholding = false;
        self
    }

    /// Apply every set field of `options` through the matching mutator.
    ///
    /// A lone `width` or `height` is checked against the current value of
    /// the other dimension.
    pub fn apply_options(mut self, options: ImageGenerationOptions) -> Result<Self, ImageError> {
        if let Some(model) = options.model {
            self = self.set_model(model);
        }
        if options.width.is_some() || options.height.is_some() {
            let width = options.width.unwrap_or(self.width);
            let height = options.height.unwrap_or(self.height);
            self = self.set_size(width, height)?;
        }
        match (options.prompt, options.character_prompts) {
            (Some(prompt), Some(characters)) => {
                self = self.set_prompt_with_characters(prompt, characters);
            }
            (Some(prompt), None) => self = self.set_prompt(prompt),
            (None, Some(characters)) => self.character_prompts = characters,
            (None, None) => {}
        }
        if let Some(negative) = options.negative_prompt {
            self = self.set_negative_prompt(negative);
        }
        if let Some(seed) = options.seed {
            self = self.set_seed(seed)?;
        }
        if let Some(steps) = options.steps {
            self = self.set_steps(steps)?;
        }
        if let Some(scale) = options.scale {
            self = self.set_cfg_scale(scale)?;
        }
        if let Some(sampler) = options.sampler {
            self = self.set_sampler(sampler);
        }
        if let Some(preset) = options.uc_preset {
            self = self.set_negative_preset(preset);
        }
        if let Some(enabled) = options.quality_toggle {
            self = self.enable_auto_quality_tags(enabled);
        }
        match options.smea {
            Some(true) => {
                let dynamic = options.smea_dyn.unwrap_or(self.smea_dyn);
                self = self.enable_smea(dynamic);
            }
            Some(false) => self = self.disable_smea(),
            None => {
                if let Some(dynamic) = options.smea_dyn {
                    self.smea_dyn = dynamic;
                }
            }
        }
        if let Some(schedule) = options.noise_schedule {
            self = self.set_noise_schedule(schedule);
        }
        Ok(self)
    }

    /// The seed that will be sent.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advisory length check of the combined input prompt.
    pub fn prompt_warning(&self) -> PromptWarning {
        params::check_prompt_length(&self.input_string())
    }

    fn input_string(&self) -> String {
        if self.character_prompts.is_empty() {
            return self.prompt.clone();
        }
        std::iter::once(self.prompt.as_str())
            .chain(self.character_prompts.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(protocol::CHARACTER_SEPARATOR)
    }

    fn condition(base: &str, characters: &[String]) -> V4ConditionInput {
        V4ConditionInput {
            caption: Caption {
                base_caption: base.to_string(),
                char_captions: characters.to_vec(),
            },
            use_coords: protocol::USE_COORDS,
            use_order: protocol::USE_ORDER,
            legacy_uc: protocol::LEGACY_UC,
        }
    }

    /// Snapshot the current state as a wire payload. Pure; calling it twice
    /// without mutation yields equal payloads.
    pub fn build_payload(&self) -> GenerateImagePayload {
        let parameters = ImageParameters {
            width: self.width,
            height: self.height,
            scale: self.scale,
            sampler: self.sampler,
            steps: self.steps,
            n_samples: self.n_samples,
            seed: self.seed,
            negative_prompt: self.negative_prompt.clone(),
            v4_prompt: Self::condition(&self.prompt, &self.character_prompts),
            v4_negative_prompt: Self::condition(
                &self.negative_prompt,
                &self.character_negative_prompts,
            ),
            quality_toggle: self.quality_toggle,
            uc_preset: self.uc_preset,
            params_version: protocol::PARAMS_VERSION,
            noise_schedule: self.noise_schedule,
            sm: self.smea,
            sm_dyn: self.smea && self.smea_dyn,
            dynamic_thresholding: self.dynamic_thresholding,
            prefer_brownian: protocol::PREFER_BROWNIAN,
            deliberate_euler_ancestral_bug: protocol::DELIBERATE_EULER_ANCESTRAL_BUG,
            legacy: protocol::LEGACY,
            legacy_v3_extend: protocol::LEGACY_V3_EXTEND,
        };

        GenerateImagePayload {
            input: self.input_string(),
            model: self.model,
            action: ImageAction::Generate,
            parameters,
        }
    }

    /// Build the payload and submit it.
    pub async fn generate(self) -> Result<ImageResponse, ImageError> {
        let payload = self.prepare();
        self.executor.execute(&payload).await
    }

    /// Like [`Self::generate`], failing with a network error once `cancel`
    /// fires.
    pub async fn generate_with_cancel(
        self,
        cancel: &CancelHandle,
    ) -> Result<ImageResponse, ImageError> {
        let payload = self.prepare();
        self.executor.execute_with_cancel(&payload, cancel).await
    }

    fn prepare(&self) -> GenerateImagePayload {
        let warning = self.prompt_warning();
        if warning.exceeds {
            tracing::warn!(
                target: "novelai_image::builder",
                length = warning.length,
                limit = warning.limit,
                "prompt exceeds the recommended length"
            );
        }
        self.build_payload()
    }
}

impl std::fmt::Debug for ImageRequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRequestBuilder")
            .field("model", &self.model)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("prompt", &self.prompt)
            .field("character_prompts", &self.character_prompts)
            .field("seed", &self.seed)
            .field("steps", &self.steps)
            .field("scale", &self.scale)
            .field("n_samples", &self.n_samples)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::utils::entropy::FixedSeed;
    use std::sync::Mutex;

    /// Records payloads instead of sending them.
    #[derive(Default)]
    struct RecordingExecutor {
        payloads: Mutex<Vec<GenerateImagePayload>>,
    }

    #[async_trait::async_trait]
    impl ImageExecutor for RecordingExecutor {
        async fn execute(
            &self,
            payload: &GenerateImagePayload,
        ) -> Result<ImageResponse, ImageError> {
            self.payloads.lock().unwrap().push(payload.clone());
            Ok(ImageResponse {
                images: vec![b"img".to_vec()],
                metadata: Some(payload.into()),
            })
        }

        async fn execute_with_cancel(
            &self,
            payload: &GenerateImagePayload,
            cancel: &CancelHandle,
        ) -> Result<ImageResponse, ImageError> {
            if cancel.is_cancelled() {
                return Err(ImageError::network("Request was cancelled"));
            }
            self.execute(payload).await
        }
    }

    fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::new(Arc::new(RecordingExecutor::default()), &FixedSeed(1234))
    }

    #[test]
    fn default_payload() {
        let payload = builder().build_payload();
        let p = &payload.parameters;
        assert_eq!(payload.model, ImageModel::V45Full);
        assert_eq!(payload.action, ImageAction::Generate);
        assert_eq!((p.width, p.height), (832, 1216));
        assert_eq!(p.steps, 23);
        assert_eq!(p.scale, 5.0);
        assert_eq!(p.n_samples, 1);
        assert_eq!(p.seed, 1234);
        assert_eq!(p.sampler, Sampler::EulerAncestral);
        assert_eq!(p.uc_preset, NegativePreset::Heavy);
        assert_eq!(p.noise_schedule, NoiseSchedule::Karras);
        assert_eq!(p.params_version, 3);
        assert!(p.quality_toggle);
        assert!(!p.sm && !p.sm_dyn && !p.dynamic_thresholding);
        assert!(p.prefer_brownian && p.deliberate_euler_ancestral_bug);
        assert!(!p.legacy && !p.legacy_v3_extend);
    }

    #[test]
    fn character_prompts_join_with_pipes() {
        let payload = builder()
            .set_prompt("two people at a cafe")
            .add_character("woman with glasses")
            .add_character("man in a hat")
            .set_negative_prompt("blurry")
            .add_character_negative("extra fingers")
            .build_payload();

        assert_eq!(
            payload.input,
            "two people at a cafe | woman with glasses | man in a hat"
        );
        let v4 = &payload.parameters.v4_prompt;
        assert_eq!(v4.caption.base_caption, "two people at a cafe");
        assert_eq!(v4.caption.char_captions, vec!["woman with glasses", "man in a hat"]);
        assert!(!v4.use_coords && v4.use_order && !v4.legacy_uc);

        let neg = &payload.parameters.v4_negative_prompt;
        assert_eq!(neg.caption.base_caption, "blurry");
        assert_eq!(neg.caption.char_captions, vec!["extra fingers"]);
        assert_eq!(payload.parameters.negative_prompt, "blurry");
    }

    #[test]
    fn prompt_without_characters_is_sent_verbatim() {
        let payload = builder().set_prompt("a quiet forest").build_payload();
        assert_eq!(payload.input, "a quiet forest");
        assert!(payload.parameters.v4_prompt.caption.char_captions.is_empty());
    }

    #[test]
    fn set_prompt_keeps_characters_but_with_characters_replaces_them() {
        let b = builder().add_character("knight").set_prompt("castle");
        assert_eq!(b.build_payload().input, "castle | knight");

        let b = b.set_prompt_with_characters("castle", ["dragon"]);
        assert_eq!(b.build_payload().input, "castle | dragon");

        let b = b
            .set_negative_prompt_with_characters("lowres", ["bad wings"])
            .set_negative_prompt("jpeg artifacts");
        let neg = b.build_payload().parameters.v4_negative_prompt;
        assert_eq!(neg.caption.base_caption, "jpeg artifacts");
        assert_eq!(neg.caption.char_captions, vec!["bad wings"]);
    }

    #[test]
    fn smea_dynamic_requires_smea() {
        let p = builder().enable_smea(true).build_payload().parameters;
        assert!(p.sm && p.sm_dyn);

        let p = builder().enable_smea(false).build_payload().parameters;
        assert!(p.sm && !p.sm_dyn);

        let p = builder().enable_smea(true).disable_smea().build_payload().parameters;
        assert!(!p.sm && !p.sm_dyn);

        let options = ImageGenerationOptions {
            smea_dyn: Some(true),
            ..Default::default()
        };
        let p = builder().apply_options(options).unwrap().build_payload().parameters;
        assert!(!p.sm && !p.sm_dyn);
    }

    #[test]
    fn validating_setters_reject_bad_input() {
        let err = builder().set_size(1000, 1024).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(builder().set_steps(0).is_err());
        assert!(builder().set_steps(51).is_err());
        assert!(builder().set_cfg_scale(10.5).is_err());
        assert!(builder().set_cfg_scale(f64::NAN).is_err());
        assert!(builder().set_batch_size(0).is_err());
        assert!(builder().set_seed(u64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn validating_setters_accept_bounds() {
        let p = builder()
            .set_size(1024, 1024)
            .unwrap()
            .set_steps(50)
            .unwrap()
            .set_cfg_scale(0.0)
            .unwrap()
            .set_batch_size(4)
            .unwrap()
            .set_seed(u64::from(u32::MAX))
            .unwrap()
            .build_payload()
            .parameters;
        assert_eq!((p.width, p.height, p.steps, p.n_samples), (1024, 1024, 50, 4));
        assert_eq!(p.scale, 0.0);
        assert_eq!(p.seed, u32::MAX);
    }

    #[test]
    fn plain_setters() {
        let p = builder()
            .set_model(ImageModel::V4Curated)
            .set_sampler(Sampler::DpmSde)
            .set_negative_preset(NegativePreset::None)
            .enable_auto_quality_tags(false)
            .set_noise_schedule(NoiseSchedule::Exponential)
            .enable_dynamic_thresholding()
            .build_payload();
        assert_eq!(p.model, ImageModel::V4Curated);
        assert_eq!(p.parameters.sampler, Sampler::DpmSde);
        assert_eq!(p.parameters.uc_preset, NegativePreset::None);
        assert!(!p.parameters.quality_toggle);
        assert_eq!(p.parameters.noise_schedule, NoiseSchedule::Exponential);
        assert!(p.parameters.dynamic_thresholding);

        let p = builder()
            .enable_dynamic_thresholding()
            .disable_dynamic_thresholding()
            .build_payload();
        assert!(!p.parameters.dynamic_thresholding);
    }

    #[test]
    fn build_payload_is_idempotent() {
        let b = builder().set_prompt("x").add_character("y");
        assert_eq!(b.build_payload(), b.build_payload());
    }

    #[test]
    fn seed_comes_from_source() {
        let b = ImageRequestBuilder::new(Arc::new(RecordingExecutor::default()), &FixedSeed(7));
        assert_eq!(b.seed(), 7);
        assert_eq!(b.build_payload().parameters.seed, 7);
    }

    #[test]
    fn apply_options_uses_the_same_checks() {
        let options: ImageGenerationOptions = serde_json::from_str(
            r#"{"prompt":"sky","characterPrompts":["bird"],"width":1024,"steps":30,"seed":99,"smea":true,"smeaDyn":true}"#,
        )
        .unwrap();
        let p = builder().apply_options(options).unwrap().build_payload();
        assert_eq!(p.input, "sky | bird");
        assert_eq!((p.parameters.width, p.parameters.height), (1024, 1216));
        assert_eq!(p.parameters.steps, 30);
        assert_eq!(p.parameters.seed, 99);
        assert!(p.parameters.sm && p.parameters.sm_dyn);

        let bad = ImageGenerationOptions {
            height: Some(1000),
            ..Default::default()
        };
        assert_eq!(
            builder().apply_options(bad).unwrap_err().kind(),
            ErrorKind::Validation
        );
        let bad = ImageGenerationOptions {
            scale: Some(11.0),
            ..Default::default()
        };
        assert!(builder().apply_options(bad).is_err());
    }

    #[test]
    fn prompt_warning_covers_characters() {
        let b = builder()
            .set_prompt("a".repeat(1990))
            .add_character("b".repeat(10));
        let warning = b.prompt_warning();
        assert!(warning.exceeds);
        assert_eq!(warning.length, 2003);
        assert_eq!(warning.limit, 2000);
    }

    #[tokio::test]
    async fn generate_delegates_to_executor() {
        let executor = Arc::new(RecordingExecutor::default());
        let response = ImageRequestBuilder::new(executor.clone(), &FixedSeed(5))
            .set_prompt("mountain")
            .generate()
            .await
            .unwrap();
        assert_eq!(response.images.len(), 1);
        assert_eq!(response.metadata.unwrap().seed, 5);

        let sent = executor.payloads.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].input, "mountain");
    }

    #[tokio::test]
    async fn generate_with_cancel_passes_the_handle() {
        let cancel = CancelHandle::new();
        cancel.cancel();
        let err = builder().generate_with_cancel(&cancel).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
