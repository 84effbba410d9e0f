//! Google Gemini provider.

use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;
use secrecy::ExposeSecret;

use crate::config::ClientConfig;
use crate::credential::resolve_api_key;
use crate::errors::Error;
use crate::provider::Provider;
use crate::request::RequestSettings;

/// Environment variable holding the Google API key.
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// A configured Gemini client.
pub struct Client {
    inner: gemini::Client,
    settings: RequestSettings,
}

impl Client {
    /// Resolves the API key and builds the Rig client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] without a usable key.
    pub fn connect(config: &ClientConfig) -> Result<Self, Error> {
        let api_key = resolve_api_key(Provider::Google, config.api_key.as_ref())?;
        let mut builder = gemini::Client::builder().api_key(api_key.expose_secret());
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url.as_str());
        }
        let inner = builder
            .build()
            .map_err(|e| Error::provider_request(Provider::Google, &e))?;

        Ok(Self {
            inner,
            settings: RequestSettings::new(Provider::Google, config),
        })
    }

    /// The model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Sends `instructions` as the system instruction and `text` as the user turn.
    pub async fn complete(&self, instructions: &str, text: &str) -> Result<String, Error> {
        let mut agent = self
            .inner
            .agent(self.settings.model.as_str())
            .preamble(instructions)
            .temperature(self.settings.temperature);
        if let Some(max_tokens) = self.settings.max_tokens {
            agent = agent.max_tokens(max_tokens);
        }
        let agent = agent.build();
        self.settings.send(agent.prompt(text.to_owned())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_uses_default_model() {
        let client = Client::connect(&ClientConfig::new().with_api_key("g-key")).unwrap();
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(client.settings.provider, Provider::Google);
    }
}
