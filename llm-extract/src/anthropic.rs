//! Anthropic provider, over Rig's Anthropic client.

use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::anthropic;
use secrecy::ExposeSecret;

use crate::config::ClientConfig;
use crate::credential::resolve_api_key;
use crate::errors::Error;
use crate::provider::Provider;
use crate::request::RequestSettings;

/// Environment variable holding the Anthropic API key.
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// The Messages API requires an output bound on every request.
const DEFAULT_MAX_TOKENS: u64 = 4096;

/// A configured Anthropic client.
pub struct Client {
    inner: anthropic::Client,
    settings: RequestSettings,
}

impl Client {
    /// Resolves the API key and builds the Rig client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] without a usable key, or
    /// [`Error::ProviderRequest`] if the client cannot be built.
    pub fn connect(config: &ClientConfig) -> Result<Self, Error> {
        let api_key = resolve_api_key(Provider::Anthropic, config.api_key.as_ref())?;
        let mut builder = anthropic::Client::builder().api_key(api_key.expose_secret());
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url.as_str());
        }
        let inner = builder
            .build()
            .map_err(|e| Error::provider_request(Provider::Anthropic, &e))?;

        Ok(Self {
            inner,
            settings: RequestSettings::new(Provider::Anthropic, config),
        })
    }

    /// The model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Prompts an agent whose preamble is `instructions` with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProviderRequest`] on any transport, status or decode
    /// failure, or when the timeout expires.
    pub async fn complete(&self, instructions: &str, text: &str) -> Result<String, Error> {
        let agent = self
            .inner
            .agent(self.settings.model.as_str())
            .preamble(instructions)
            .temperature(self.settings.temperature)
            .max_tokens(self.settings.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS))
            .build();
        self.settings.send(agent.prompt(text.to_owned())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_keeps_defaults() {
        let client = Client::connect(&ClientConfig::new().with_api_key("sk-ant")).unwrap();
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(client.settings.max_tokens, None);
    }

    #[test]
    fn test_connect_with_base_url_override() {
        let config = ClientConfig::new()
            .with_api_key("sk-ant")
            .with_model("claude-3-5-haiku-latest")
            .with_base_url("http://127.0.0.1:9");
        let client = Client::connect(&config).unwrap();
        assert_eq!(client.model(), "claude-3-5-haiku-latest");
    }
}
