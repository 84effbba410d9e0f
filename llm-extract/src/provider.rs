//! Provider selection and the model-call seam.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::errors::Error;
use crate::{anthropic, gemini, openai};

/// A supported model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Anthropic Messages API.
    Anthropic,
    /// Google Gemini API.
    Google,
    /// `OpenAI` Chat Completions API.
    OpenAi,
}

impl Provider {
    /// Every supported provider, in display order.
    pub const ALL: [Self; 3] = [Self::Anthropic, Self::Google, Self::OpenAi];

    /// The canonical lowercase key (`anthropic`, `google`, `openai`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::OpenAi => "openai",
        }
    }

    /// Environment variable consulted for this provider's API key.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Anthropic => anthropic::ANTHROPIC_API_KEY_ENV,
            Self::Google => gemini::GOOGLE_API_KEY_ENV,
            Self::OpenAi => openai::OPENAI_API_KEY_ENV,
        }
    }

    /// Model used when [`ClientConfig::model`] is unset.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => anthropic::DEFAULT_MODEL,
            Self::Google => gemini::DEFAULT_MODEL,
            Self::OpenAi => openai::DEFAULT_MODEL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Provider {
    type Err = Error;

    /// Case-insensitive. `claude` and `gemini` are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "google" | "gemini" => Ok(Self::Google),
            "openai" => Ok(Self::OpenAi),
            _ => Err(Error::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Something that can answer one instruction + text request with model output.
///
/// Implemented by [`ProviderClient`] for the real providers. Tests and callers
/// with their own transport can implement it directly and hand it to
/// [`Extractor::extract_with_client`](crate::orchestrator::Extractor::extract_with_client).
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends `instructions` as the system turn and `text` as the user turn,
    /// returning the model's raw text answer.
    async fn send(&self, instructions: &str, text: &str) -> Result<String, Error>;
}

/// A configured Rig client for one of the supported providers.
pub enum ProviderClient {
    /// Anthropic client.
    Anthropic(anthropic::Client),
    /// Google Gemini client.
    Google(gemini::Client),
    /// `OpenAI` client.
    OpenAi(openai::Client),
}

impl ProviderClient {
    /// Builds a client for `provider`, resolving its API key now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if neither `config.api_key` nor the
    /// provider's environment variable holds a non-empty key.
    pub fn connect(provider: Provider, config: &ClientConfig) -> Result<Self, Error> {
        let client = match provider {
            Provider::Anthropic => Self::Anthropic(anthropic::Client::connect(config)?),
            Provider::Google => Self::Google(gemini::Client::connect(config)?),
            Provider::OpenAi => Self::OpenAi(openai::Client::connect(config)?),
        };
        tracing::info!(provider = %provider, model = client.model(), "Provider client ready");
        Ok(client)
    }

    /// The provider this client talks to.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        match self {
            Self::Anthropic(_) => Provider::Anthropic,
            Self::Google(_) => Provider::Google,
            Self::OpenAi(_) => Provider::OpenAi,
        }
    }

    /// The model identifier requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::Anthropic(client) => client.model(),
            Self::Google(client) => client.model(),
            Self::OpenAi(client) => client.model(),
        }
    }
}

#[async_trait]
impl ModelClient for ProviderClient {
    async fn send(&self, instructions: &str, text: &str) -> Result<String, Error> {
        match self {
            Self::Anthropic(client) => client.complete(instructions, text).await,
            Self::Google(client) => client.complete(instructions, text).await,
            Self::OpenAi(client) => client.complete(instructions, text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!(" GOOGLE ".parse::<Provider>().unwrap(), Provider::Google);
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
    }

    #[test]
    fn test_aliases() {
        assert_eq!("claude".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Google);
    }

    #[test]
    fn test_unknown_provider_keeps_the_input() {
        let err = "mistral".parse::<Provider>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
        assert!(matches!(err, Error::UnsupportedProvider(ref key) if key == "mistral"));
    }

    #[test]
    fn test_display_round_trips() {
        for provider in Provider::ALL {
            assert_eq!(provider.to_string().parse::<Provider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_env_vars() {
        assert_eq!(Provider::Anthropic.env_var(), "ANTHROPIC_API_KEY");
        assert_eq!(Provider::Google.env_var(), "GOOGLE_API_KEY");
        assert_eq!(Provider::OpenAi.env_var(), "OPENAI_API_KEY");
    }

    #[test]
    fn test_connect_with_explicit_key_applies_overrides() {
        let config = ClientConfig::new()
            .with_api_key("sk-test")
            .with_model("gpt-4o")
            .with_base_url("http://localhost:1234");
        let client = ProviderClient::connect(Provider::OpenAi, &config).unwrap();
        assert_eq!(client.provider(), Provider::OpenAi);
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn test_connect_every_provider_with_explicit_key() {
        for provider in Provider::ALL {
            let config = ClientConfig::new()
                .with_api_key("key")
                .with_base_url("http://127.0.0.1:9");
            let client = ProviderClient::connect(provider, &config).unwrap();
            assert_eq!(client.provider(), provider);
            assert_eq!(client.model(), provider.default_model());
        }
    }

    #[test]
    fn test_connect_uses_default_model() {
        let config = ClientConfig::new().with_api_key("key");
        let client = ProviderClient::connect(Provider::Google, &config).unwrap();
        assert_eq!(client.model(), Provider::Google.default_model());
    }
}
