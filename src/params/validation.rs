//! Parameter validation.
//!
//! Pure checks run eagerly by the builder setters. Each failure is an
//! [`ImageError::ValidationError`] naming the rule and the offending value.

use crate::defaults::{DEFAULT_PROMPT_LIMIT, generation};
use crate::error::ImageError;

/// Width and height must be positive multiples of 64.
pub fn validate_resolution(width: u32, height: u32) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::validation("Width and height must be positive"));
    }
    if width % generation::RESOLUTION_STEP != 0 {
        return Err(ImageError::validation(format!(
            "Width must be a multiple of 64, got {width}"
        )));
    }
    if height % generation::RESOLUTION_STEP != 0 {
        return Err(ImageError::validation(format!(
            "Height must be a multiple of 64, got {height}"
        )));
    }
    Ok(())
}

/// Steps must lie in `1..=50`.
pub fn validate_steps(steps: u32) -> Result<(), ImageError> {
    if !(generation::MIN_STEPS..=generation::MAX_STEPS).contains(&steps) {
        return Err(ImageError::validation(format!(
            "Steps must be between 1 and 50, got {steps}"
        )));
    }
    Ok(())
}

/// Guidance scale must be a finite number in `[0, 10]`.
pub fn validate_scale(scale: f64) -> Result<(), ImageError> {
    if scale.is_nan() {
        return Err(ImageError::validation("Scale must be a number"));
    }
    if !(generation::MIN_SCALE..=generation::MAX_SCALE).contains(&scale) {
        return Err(ImageError::validation(format!(
            "Scale must be between 0 and 10, got {scale}"
        )));
    }
    Ok(())
}

/// Seed must fit an unsigned 32-bit integer.
pub fn validate_seed(seed: u64) -> Result<(), ImageError> {
    if seed > u64::from(u32::MAX) {
        return Err(ImageError::validation(format!(
            "Seed must be between 0 and 2^32-1, got {seed}"
        )));
    }
    Ok(())
}

/// Batch size must be at least one. Each sample costs Anlas.
pub fn validate_batch_size(count: u32) -> Result<(), ImageError> {
    if count == 0 {
        return Err(ImageError::validation(
            "Batch size must be a positive integer",
        ));
    }
    Ok(())
}

/// Advisory result of [`check_prompt_length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptWarning {
    pub exceeds: bool,
    pub length: usize,
    pub limit: usize,
}

/// Compare a prompt against the default 2000 character limit.
///
/// Never fails; meant for UX hints, not request rejection.
pub fn check_prompt_length(text: &str) -> PromptWarning {
    check_prompt_length_with_limit(text, DEFAULT_PROMPT_LIMIT)
}

/// Compare a prompt against a custom character limit.
pub fn check_prompt_length_with_limit(text: &str, limit: usize) -> PromptWarning {
    let length = text.chars().count();
    PromptWarning {
        exceeds: length > limit,
        length,
        limit,
    }
}
