//! `OpenAI` provider. `base_url` may point at any OpenAI-compatible server.

use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;
use secrecy::ExposeSecret;
use serde_json::json;

use crate::config::ClientConfig;
use crate::credential::resolve_api_key;
use crate::errors::Error;
use crate::provider::Provider;
use crate::request::RequestSettings;

/// Environment variable holding the `OpenAI` API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// A configured `OpenAI` client. Requests go to Chat Completions in JSON mode.
pub struct Client {
    inner: openai::Client,
    settings: RequestSettings,
}

impl Client {
    /// Resolves the API key and builds the Rig client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] without a usable key.
    pub fn connect(config: &ClientConfig) -> Result<Self, Error> {
        let api_key = resolve_api_key(Provider::OpenAi, config.api_key.as_ref())?;
        let mut builder = openai::Client::builder().api_key(api_key.expose_secret());
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url.as_str());
        }
        let inner = builder
            .build()
            .map_err(|e| Error::provider_request(Provider::OpenAi, &e))?;

        Ok(Self {
            inner,
            settings: RequestSettings::new(Provider::OpenAi, config),
        })
    }

    /// The model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Sends one system + user exchange and returns the reply text.
    pub async fn complete(&self, instructions: &str, text: &str) -> Result<String, Error> {
        let mut agent = self
            .inner
            .clone()
            .completions_api()
            .agent(self.settings.model.as_str())
            .preamble(instructions)
            .temperature(self.settings.temperature)
            .additional_params(json!({ "response_format": { "type": "json_object" } }));
        if let Some(max_tokens) = self.settings.max_tokens {
            agent = agent.max_tokens(max_tokens);
        }
        let agent = agent.build();
        self.settings.send(agent.prompt(text.to_owned())).await
    }
}
