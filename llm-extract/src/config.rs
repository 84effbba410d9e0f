//! Client and extraction configuration.

use std::time::Duration;

use secrecy::SecretString;

/// Configuration applied to whichever provider client is selected.
///
/// `None` fields fall back to the provider's own defaults (model, base URL)
/// or to the environment (API key).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Explicit API key. Overrides the provider's environment variable.
    pub api_key: Option<SecretString>,

    /// Model identifier override.
    pub model: Option<String>,

    /// API base URL override, e.g. for an OpenAI-compatible server or a test
    /// double. For `OpenAI` this includes the `/v1` segment.
    pub base_url: Option<String>,

    /// Maximum time for one request/response exchange.
    ///
    /// Default: 60 seconds
    pub timeout: Duration,

    /// Sampling temperature. Default: 0.0
    pub temperature: f32,

    /// Upper bound on generated tokens (`None` = provider default).
    pub max_tokens: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            base_url: None,
            timeout: Duration::from_secs(60),
            temperature: 0.0,
            max_tokens: None,
        }
    }
}

impl ClientConfig {
    /// Create a new `ClientConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets an explicit API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }
}

/// Configuration for the repair turn.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Requests allowed per extraction (default: 1, i.e. no repair turn).
    pub max_attempts: usize,
    /// Whether to include the full schema in repair feedback (default: true).
    pub include_schema_in_feedback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            include_schema_in_feedback: true,
        }
    }
}

impl ExtractionConfig {
    /// Set the maximum number of attempts. Values below 1 are treated as 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set whether to include the schema in repair feedback.
    #[must_use]
    pub const fn with_schema_in_feedback(mut self, include: bool) -> Self {
        self.include_schema_in_feedback = include;
        self
    }
}
