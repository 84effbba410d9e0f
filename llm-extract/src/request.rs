//! Settings and timeout handling shared by the provider clients.

use std::future::IntoFuture;
use std::time::Duration;

use rig::completion::PromptError;
use tokio::time::{timeout, Instant};

use crate::config::ClientConfig;
use crate::errors::Error;
use crate::provider::Provider;

/// Per-request settings resolved from a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RequestSettings {
    pub provider: Provider,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u64>,
    pub timeout: Duration,
}

impl RequestSettings {
    pub(crate) fn new(provider: Provider, config: &ClientConfig) -> Self {
        Self {
            provider,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            temperature: f64::from(config.temperature),
            max_tokens: config.max_tokens.map(u64::from),
            timeout: config.timeout,
        }
    }

    /// Awaits one agent prompt, bounded by the configured timeout.
    ///
    /// Every failure, including an expired timeout, becomes
    /// [`Error::ProviderRequest`].
    pub(crate) async fn send<F>(&self, request: F) -> Result<String, Error>
    where
        F: IntoFuture<Output = Result<String, PromptError>>,
    {
        tracing::debug!(provider = %self.provider, model = %self.model, "Sending prompt");
        let start_time = Instant::now();

        let text = match timeout(self.timeout, request).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::debug!(provider = %self.provider, error = %e, "Prompt failed");
                return Err(Error::provider_request(self.provider, &e));
            }
            Err(_) => {
                return Err(Error::ProviderRequest {
                    provider: self.provider,
                    message: format!("request timed out after {:?}", self.timeout),
                });
            }
        };

        tracing::debug!(
            provider = %self.provider,
            elapsed_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Prompt answered"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_fall_back_to_provider_defaults() {
        let settings = RequestSettings::new(Provider::Anthropic, &ClientConfig::default());
        assert_eq!(settings.model, "claude-3-5-sonnet-latest");
        assert_eq!(settings.max_tokens, None);
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert!(settings.temperature.abs() < f64::EPSILON);
    }

    #[test]
    fn test_settings_apply_overrides() {
        let mut config = ClientConfig::new()
            .with_model("gpt-4o")
            .with_timeout(Duration::from_secs(5));
        config.max_tokens = Some(512);
        let settings = RequestSettings::new(Provider::OpenAi, &config);
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.max_tokens, Some(512));
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_send_maps_prompt_error_to_provider_request() {
        let settings = RequestSettings::new(Provider::Google, &ClientConfig::default());
        let failing = async {
            Err::<String, _>(PromptError::CompletionError(
                rig::completion::CompletionError::ProviderError("quota exceeded".to_string()),
            ))
        };
        let err = settings.send(failing).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ProviderRequest { provider: Provider::Google, ref message }
                if message.contains("quota exceeded")
        ));
    }

    #[tokio::test]
    async fn test_send_times_out() {
        let settings = RequestSettings::new(
            Provider::Anthropic,
            &ClientConfig::new().with_timeout(Duration::from_millis(20)),
        );
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, PromptError>(String::new())
        };
        let err = settings.send(slow).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ProviderRequest { provider: Provider::Anthropic, ref message }
                if message.contains("timed out")
        ));
    }

    #[tokio::test]
    async fn test_send_passes_text_through() {
        let settings = RequestSettings::new(Provider::OpenAi, &ClientConfig::default());
        let text = settings
            .send(async { Ok::<_, PromptError>("{}".to_string()) })
            .await
            .unwrap();
        assert_eq!(text, "{}");
    }
}
