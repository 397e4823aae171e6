//! Image generation executor

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use secrecy::ExposeSecret;

use super::errors::classify_http_error;
use crate::error::ImageError;
use crate::execution::http::headers::HttpHeaderBuilder;
use crate::execution::http::transport::{
    HttpTransport, HttpTransportRequest, HttpTransportResponse,
};
use crate::types::{ClientConfig, GenerateImagePayload, ImageMetadata, ImageResponse};
use crate::utils::archive::ArchiveDecoder;
use crate::utils::cancel::CancelHandle;
use crate::utils::entropy::{CorrelationIdSource, ThreadRngEntropy};

/// Submits a built payload and returns the decoded images.
#[async_trait::async_trait]
pub trait ImageExecutor: Send + Sync {
    async fn execute(&self, payload: &GenerateImagePayload) -> Result<ImageResponse, ImageError>;

    async fn execute_with_cancel(
        &self,
        payload: &GenerateImagePayload,
        cancel: &CancelHandle,
    ) -> Result<ImageResponse, ImageError>;
}

/// HTTP-based image executor
///
/// Performs exactly one POST per call. Nothing is retried.
pub struct HttpImageExecutor {
    transport: Arc<dyn HttpTransport>,
    url: String,
    headers: HeaderMap,
    timeout: Duration,
    decoder: ArchiveDecoder,
    correlation: Arc<dyn CorrelationIdSource>,
}

impl HttpImageExecutor {
    /// Build an executor for `config`. Fails with a configuration error when
    /// the token or a custom header cannot be sent over HTTP.
    pub fn new(config: &ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self, ImageError> {
        config.validate()?;
        // Protocol headers are applied last so custom headers cannot replace them.
        let headers = HttpHeaderBuilder::new()
            .with_custom_headers(&config.http.headers)?
            .with_bearer_auth(config.token.expose_secret())?
            .with_json_content_type()
            .with_archive_accept()
            .build();
        Ok(Self {
            transport,
            url: config.generate_url(),
            headers,
            timeout: config.timeout,
            decoder: ArchiveDecoder::default(),
            correlation: Arc::new(ThreadRngEntropy),
        })
    }

    pub fn with_archive_decoder(mut self, decoder: ArchiveDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_correlation_source(mut self, source: Arc<dyn CorrelationIdSource>) -> Self {
        self.correlation = source;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn decoder(&self) -> &ArchiveDecoder {
        &self.decoder
    }

    /// Submit a payload, bounded by the configured timeout.
    pub async fn submit(&self, payload: &GenerateImagePayload) -> Result<ImageResponse, ImageError> {
        self.run(payload, None).await
    }

    /// Like [`Self::submit`], but also fails as soon as `cancel` fires.
    pub async fn submit_with_cancel(
        &self,
        payload: &GenerateImagePayload,
        cancel: &CancelHandle,
    ) -> Result<ImageResponse, ImageError> {
        self.run(payload, Some(cancel)).await
    }

    async fn run(
        &self,
        payload: &GenerateImagePayload,
        cancel: Option<&CancelHandle>,
    ) -> Result<ImageResponse, ImageError> {
        let correlation_id = self.correlation.next_correlation_id();
        let request = self.build_request(payload, &correlation_id)?;

        tracing::debug!(
            target: "novelai_image::http",
            url = %self.url,
            model = %payload.model,
            correlation_id = %correlation_id,
            "submitting image generation"
        );

        let started = Instant::now();
        let response = match self.exchange(request, cancel).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: "novelai_image::http",
                    correlation_id = %correlation_id,
                    error = %err,
                    "image generation request failed"
                );
                return Err(err);
            }
        };

        if !response.is_success() {
            let err = classify_http_error(
                response.status,
                &response.headers,
                &response.body,
                &correlation_id,
            );
            tracing::warn!(
                target: "novelai_image::http",
                status = response.status,
                correlation_id = %correlation_id,
                error = %err,
                "image generation returned an error status"
            );
            return Err(err);
        }

        let images = self.decoder.extract_images(&response.body)?;
        tracing::info!(
            target: "novelai_image::http",
            images = images.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            correlation_id = %correlation_id,
            "image generation completed"
        );

        Ok(ImageResponse {
            images,
            metadata: Some(ImageMetadata::from(payload)),
        })
    }

    fn build_request(
        &self,
        payload: &GenerateImagePayload,
        correlation_id: &str,
    ) -> Result<HttpTransportRequest, ImageError> {
        let body = serde_json::to_vec(payload)?;
        let headers = HttpHeaderBuilder::from_headers(self.headers.clone())
            .with_correlation_id(correlation_id)?
            .build();
        Ok(HttpTransportRequest {
            url: self.url.clone(),
            headers,
            body,
        })
    }

    /// Send the request, racing it against the deadline and the optional
    /// cancel handle. The losing futures are dropped.
    async fn exchange(
        &self,
        request: HttpTransportRequest,
        cancel: Option<&CancelHandle>,
    ) -> Result<HttpTransportResponse, ImageError> {
        let send = tokio::time::timeout(self.timeout, self.transport.send(request));
        let outcome = match cancel {
            Some(cancel) => tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(ImageError::network("Request was cancelled"));
                }
                outcome = send => outcome,
            },
            None => send.await,
        };
        match outcome {
            Ok(result) => result,
            Err(elapsed) => Err(ImageError::network_with_cause(
                format!("Request timed out after {}ms", self.timeout.as_millis()),
                elapsed,
            )),
        }
    }
}

impl std::fmt::Debug for HttpImageExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageExecutor")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl ImageExecutor for HttpImageExecutor {
    async fn execute(&self, payload: &GenerateImagePayload) -> Result<ImageResponse, ImageError> {
        self.submit(payload).await
    }

    async fn execute_with_cancel(
        &self,
        payload: &GenerateImagePayload,
        cancel: &CancelHandle,
    ) -> Result<ImageResponse, ImageError> {
        self.submit_with_cancel(payload, cancel).await
    }
}
