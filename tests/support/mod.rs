//! Shared helpers for the integration tests

#![allow(dead_code)]

pub mod archive_fixture;

use std::sync::Arc;
use std::time::Duration;

use novelai_image::NovelAiClient;
use novelai_image::utils::entropy::{FixedCorrelationId, FixedSeed};

pub const TEST_TOKEN: &str = "pst-test-token";
pub const TEST_CORRELATION_ID: &str = "Ab12Cd";
pub const TEST_SEED: u32 = 424242;

/// Client pointed at a mock server with deterministic seed and correlation id.
pub fn client_for(base_url: &str) -> NovelAiClient {
    client_with_timeout(base_url, Duration::from_secs(10))
}

pub fn client_with_timeout(base_url: &str, timeout: Duration) -> NovelAiClient {
    NovelAiClient::builder()
        .token(TEST_TOKEN)
        .base_url(base_url)
        .timeout(timeout)
        .seed_source(Arc::new(FixedSeed(TEST_SEED)))
        .correlation_source(Arc::new(FixedCorrelationId(TEST_CORRELATION_ID.to_string())))
        .build()
        .expect("client builds")
}
