//! Gemini client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{GeminiError, GeminiResult};

/// Default public endpoint for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default model used for normalization.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`GeminiClient`](crate::GeminiClient).
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential, sent as the `x-goog-api-key` header.
    pub api_key: String,
    /// Base URL of the Gemini API (overridable for tests).
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Create a config with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> GeminiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::Initialization(
                "API key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Create config from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_BASE_URL`, `GEMINI_MODEL` and
    /// `GEMINI_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> GeminiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            GeminiError::Initialization("GEMINI_API_KEY is not set".to_string())
        })?;

        let mut config = Self::new(api_key)?;
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(secs) = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// The credential must never reach logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeminiConfig::new("test-key").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_api_key_is_an_initialization_error() {
        let err = GeminiConfig::new("   ").unwrap_err();
        assert!(matches!(err, GeminiError::Initialization(_)));
    }

    #[test]
    fn test_debug_redacts_the_credential() {
        let config = GeminiConfig::new("super-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeminiConfig::new("test-key")
            .unwrap()
            .with_base_url("http://localhost:9000")
            .with_model("gemini-exp")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.model, "gemini-exp");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
