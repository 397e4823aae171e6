//! NovelAI Client
//!
//! Entry point of the crate. A [`NovelAiClient`] owns a configured
//! [`HttpImageExecutor`] and hands out [`ImageRequestBuilder`]s bound to it.
//! The client is cheap to clone and safe to share across tasks; it holds no
//! mutable state between calls.

use std::sync::Arc;
use std::time::Duration;

use crate::builder::ImageRequestBuilder;
use crate::error::ImageError;
use crate::execution::{HttpImageExecutor, HttpTransport, ImageExecutor, ReqwestTransport};
use crate::types::{ClientConfig, GenerateImagePayload, HttpConfig, ImageResponse};
use crate::utils::archive::{ArchiveBackend, ArchiveDecoder};
use crate::utils::cancel::CancelHandle;
use crate::utils::entropy::{CorrelationIdSource, SeedSource, ThreadRngEntropy};

/// Client for the NovelAI image generation API.
#[derive(Clone)]
pub struct NovelAiClient {
    executor: Arc<HttpImageExecutor>,
    seeds: Arc<dyn SeedSource>,
}

impl NovelAiClient {
    /// Create a client with the default transport and entropy sources.
    pub fn new(config: ClientConfig) -> Result<Self, ImageError> {
        NovelAiClientBuilder::from_config(config).build()
    }

    /// Create a client from `NOVELAI_TOKEN` and friends.
    pub fn from_env() -> Result<Self, ImageError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn builder() -> NovelAiClientBuilder {
        NovelAiClientBuilder::new()
    }

    /// Start a new request with default parameters and a fresh seed.
    pub fn image(&self) -> ImageRequestBuilder {
        let executor: Arc<dyn ImageExecutor> = self.executor.clone();
        ImageRequestBuilder::new(executor, self.seeds.as_ref())
    }

    /// Submit an already built payload.
    pub async fn execute(&self, payload: &GenerateImagePayload) -> Result<ImageResponse, ImageError> {
        self.executor.submit(payload).await
    }

    pub async fn execute_with_cancel(
        &self,
        payload: &GenerateImagePayload,
        cancel: &CancelHandle,
    ) -> Result<ImageResponse, ImageError> {
        self.executor.submit_with_cancel(payload, cancel).await
    }

    pub fn executor(&self) -> &HttpImageExecutor {
        &self.executor
    }
}

impl std::fmt::Debug for NovelAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NovelAiClient")
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

/// Builder for [`NovelAiClient`].
///
/// ```rust,no_run
/// use novelai_image::NovelAiClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), novelai_image::ImageError> {
/// let client = NovelAiClient::builder()
///     .token("pst-...")
///     .timeout(Duration::from_secs(90))
///     .user_agent("my-app/1.0")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct NovelAiClientBuilder {
    token: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    http: HttpConfig,
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    archive_backend: Option<Arc<dyn ArchiveBackend>>,
    seeds: Option<Arc<dyn SeedSource>>,
    correlation: Option<Arc<dyn CorrelationIdSource>>,
}

impl NovelAiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete configuration. Later setters override it.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Persistent API token (`pst-...`).
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http.connect_timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.http.proxy = Some(proxy_url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = Some(user_agent.into());
        self
    }

    /// Extra header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the HTTP settings wholesale.
    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Use a custom transport instead of the default `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the archive backend picked for the current target.
    pub fn archive_backend(mut self, backend: Arc<dyn ArchiveBackend>) -> Self {
        self.archive_backend = Some(backend);
        self
    }

    pub fn seed_source(mut self, seeds: Arc<dyn SeedSource>) -> Self {
        self.seeds = Some(seeds);
        self
    }

    pub fn correlation_source(mut self, source: Arc<dyn CorrelationIdSource>) -> Self {
        self.correlation = Some(source);
        self
    }

    /// Validate the configuration and assemble the client.
    pub fn build(self) -> Result<NovelAiClient, ImageError> {
        let mut config = match (self.config, self.token) {
            (Some(config), Some(token)) => ClientConfig {
                token: token.into(),
                ..config
            },
            (Some(config), None) => config,
            (None, token) => ClientConfig::new(token.unwrap_or_default()),
        };
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        merge_http(&mut config.http, self.http);
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(&config.http)?),
        };
        let decoder = match self.archive_backend {
            Some(backend) => ArchiveDecoder::new(backend),
            None => ArchiveDecoder::default(),
        };
        let correlation = self
            .correlation
            .unwrap_or_else(|| Arc::new(ThreadRngEntropy));
        let seeds = self.seeds.unwrap_or_else(|| Arc::new(ThreadRngEntropy));

        let executor = HttpImageExecutor::new(&config, transport)?
            .with_archive_decoder(decoder)
            .with_correlation_source(correlation);

        tracing::debug!(
            target: "novelai_image::client",
            url = executor.url(),
            timeout_ms = executor.timeout().as_millis() as u64,
            backend = executor.decoder().backend().name(),
            "client constructed"
        );

        Ok(NovelAiClient {
            executor: Arc::new(executor),
            seeds,
        })
    }
}

fn merge_http(base: &mut HttpConfig, overrides: HttpConfig) {
    if overrides.connect_timeout.is_some() {
        base.connect_timeout = overrides.connect_timeout;
    }
    if overrides.proxy.is_some() {
        base.proxy = overrides.proxy;
    }
    if overrides.user_agent.is_some() {
        base.user_agent = overrides.user_agent;
    }
    base.headers.extend(overrides.headers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::archive::PortableZipBackend;
    use crate::utils::entropy::FixedSeed;

    #[test]
    fn empty_token_is_rejected() {
        let err = NovelAiClient::builder().build().unwrap_err();
        assert_eq!(
            err,
            ImageError::ConfigurationError("NovelAI API token is required".to_string())
        );
        assert!(NovelAiClient::new(ClientConfig::new("   ")).is_err());
    }

    #[test]
    fn builder_overrides_config() {
        let config = ClientConfig::new("pst-a").with_base_url("https://a.example");
        let client = NovelAiClientBuilder::from_config(config)
            .base_url("http://localhost:9000/")
            .timeout(Duration::from_millis(1500))
            .build()
            .unwrap();
        assert_eq!(
            client.executor().url(),
            "http://localhost:9000/ai/generate-image"
        );
        assert_eq!(client.executor().timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = NovelAiClient::builder()
            .token("pst-a")
            .base_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ImageError::ConfigurationError(_)));
    }

    #[test]
    fn injected_sources_and_backend_are_used() {
        let client = NovelAiClient::builder()
            .token("pst-a")
            .seed_source(Arc::new(FixedSeed(31337)))
            .archive_backend(Arc::new(PortableZipBackend))
            .build()
            .unwrap();
        assert_eq!(client.image().seed(), 31337);
        assert_eq!(client.executor().decoder().backend().name(), "portable");
    }

    #[test]
    fn http_overrides_merge() {
        let mut base = HttpConfig::default();
        base.headers.insert("a".into(), "1".into());
        base.user_agent = Some("base".into());
        let overrides = HttpConfig {
            proxy: Some("http://proxy:8080".into()),
            headers: [("b".to_string(), "2".to_string())].into_iter().collect(),
            ..Default::default()
        };
        merge_http(&mut base, overrides);
        assert_eq!(base.user_agent.as_deref(), Some("base"));
        assert_eq!(base.proxy.as_deref(), Some("http://proxy:8080"));
        assert_eq!(base.headers.len(), 2);
    }
}
