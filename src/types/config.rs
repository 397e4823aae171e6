//! Client configuration.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::time::Duration;

use crate::defaults;
use crate::error::ImageError;

/// Settings for the underlying `reqwest` client.
///
/// The whole-exchange timeout is not part of this struct; it lives on
/// [`ClientConfig`] and is enforced by the executor so that it also covers
/// custom transports.
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Option<Duration>,
    /// Custom headers sent with every request
    pub headers: HashMap<String, String>,
    /// Proxy URL
    pub proxy: Option<String>,
    /// User agent
    pub user_agent: Option<String>,
}

/// Configuration of a [`crate::client::NovelAiClient`].
#[derive(Debug)]
pub struct ClientConfig {
    /// Persistent API token (`pst-...`).
    pub token: SecretString,
    /// Base URL of the image API.
    pub base_url: String,
    /// Bound on the whole request/response exchange.
    pub timeout: Duration,
    /// HTTP client settings.
    pub http: HttpConfig,
}

impl ClientConfig {
    /// Create a configuration with default base URL and timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            timeout: defaults::DEFAULT_TIMEOUT,
            http: HttpConfig::default(),
        }
    }

    /// Load `NOVELAI_TOKEN`, and optionally `NOVELAI_BASE_URL` and
    /// `NOVELAI_TIMEOUT_MS`, from the environment.
    pub fn from_env() -> Result<Self, ImageError> {
        let token = std::env::var(defaults::env::TOKEN).map_err(|_| {
            ImageError::ConfigurationError(format!(
                "{} environment variable is not set",
                defaults::env::TOKEN
            ))
        })?;
        let mut config = Self::new(token);
        if let Ok(base_url) = std::env::var(defaults::env::BASE_URL) {
            config = config.with_base_url(base_url);
        }
        if let Ok(raw) = std::env::var(defaults::env::TIMEOUT_MS) {
            let ms = raw.trim().parse::<u64>().map_err(|e| {
                ImageError::ConfigurationError(format!(
                    "Invalid {} value '{raw}': {e}",
                    defaults::env::TIMEOUT_MS
                ))
            })?;
            config = config.with_timeout_ms(ms);
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request timeout in milliseconds.
    pub fn with_timeout_ms(self, ms: u64) -> Self {
        self.with_timeout(Duration::from_millis(ms))
    }

    /// Set HTTP client settings.
    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Add a custom header sent with every request.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.http.headers.insert(key.into(), value.into());
        self
    }

    /// Full URL of the generation endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}{}", self.base_url, defaults::GENERATE_ENDPOINT)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.token.expose_secret().trim().is_empty() {
            return Err(ImageError::ConfigurationError(
                "NovelAI API token is required".to_string(),
            ));
        }

        if self.base_url.is_empty() {
            return Err(ImageError::ConfigurationError(
                "Base URL cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ImageError::ConfigurationError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ImageError::ConfigurationError(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EnvGuard, lock_env};

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("pst-test");
        assert_eq!(config.base_url, "https://image.novelai.net");
        assert_eq!(config.timeout, Duration::from_millis(60_000));
        assert_eq!(
            config.generate_url(),
            "https://image.novelai.net/ai/generate-image"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_token() {
        let err = ClientConfig::new("  ").validate().unwrap_err();
        assert!(matches!(err, ImageError::ConfigurationError(_)));
    }

    #[test]
    fn test_config_rejects_bad_base_url() {
        let config = ClientConfig::new("pst-test").with_base_url("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = ClientConfig::new("pst-test")
            .with_base_url("https://custom.example.com/")
            .with_timeout_ms(1500);
        assert_eq!(
            config.generate_url(),
            "https://custom.example.com/ai/generate-image"
        );
        assert_eq!(config.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_from_env_reads_all_variables() {
        let _lock = lock_env();
        let _token = EnvGuard::set(defaults::env::TOKEN, "pst-from-env");
        let _url = EnvGuard::set(defaults::env::BASE_URL, "http://localhost:8080/");
        let _timeout = EnvGuard::set(defaults::env::TIMEOUT_MS, " 2500 ");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.token.expose_secret(), "pst-from-env");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_from_env_defaults_optional_variables() {
        let _lock = lock_env();
        let _token = EnvGuard::set(defaults::env::TOKEN, "pst-from-env");
        let _url = EnvGuard::remove(defaults::env::BASE_URL);
        let _timeout = EnvGuard::remove(defaults::env::TIMEOUT_MS);

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, defaults::DEFAULT_BASE_URL);
        assert_eq!(config.timeout, defaults::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_from_env_requires_token() {
        let _lock = lock_env();
        let _token = EnvGuard::remove(defaults::env::TOKEN);

        let err = ClientConfig::from_env().unwrap_err();
        assert!(matches!(err, ImageError::ConfigurationError(_)));
        assert!(err.message().contains("NOVELAI_TOKEN"), "{err}");
    }

    #[test]
    fn test_from_env_rejects_invalid_timeout() {
        let _lock = lock_env();
        let _token = EnvGuard::set(defaults::env::TOKEN, "pst-from-env");
        let _url = EnvGuard::remove(defaults::env::BASE_URL);

        for raw in ["soon", "-5", "0"] {
            let _timeout = EnvGuard::set(defaults::env::TIMEOUT_MS, raw);
            let err = ClientConfig::from_env().unwrap_err();
            assert!(matches!(err, ImageError::ConfigurationError(_)), "{raw}: {err:?}");
            assert!(err.is_local());
        }
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let config = ClientConfig::new("pst-very-secret");
        assert!(!format!("{config:?}").contains("pst-very-secret"));
    }
}
