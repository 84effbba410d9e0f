//! The extract-and-translate pipeline.
//!
//! One call builds the instructions, resolves the provider and its
//! credential, sends a single request, and validates the answer into an
//! [`ExtractionResult`]. With [`ExtractionConfig::max_attempts`] above 1, a
//! rejected answer is followed by a repair turn that carries the violations
//! back to the model.

use llm_extract_schema::{
    build_parse_error_feedback, build_validation_feedback, extraction_schema, ExtractionResult,
    SchemaValidationError, Validator,
};
use serde_json::Value;
use tokio::time::Instant;

use crate::config::{ClientConfig, ExtractionConfig};
use crate::errors::Error;
use crate::prompt::build_instructions;
use crate::provider::{ModelClient, Provider, ProviderClient};
use crate::response::parse_model_output;

/// Extracts names, emails, birth dates and URLs from `text` and translates it
/// into `target_language`, using `provider` with default settings.
///
/// `provider` is one of `anthropic`, `google` or `openai` (case-insensitive).
///
/// # Errors
///
/// See [`Extractor::extract_and_translate`].
pub async fn extract_and_translate(
    text: &str,
    target_language: &str,
    provider: &str,
) -> Result<ExtractionResult, Error> {
    Extractor::new()
        .extract_and_translate(text, target_language, provider)
        .await
}

/// Configurable extraction pipeline.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    client: ClientConfig,
    extraction: ExtractionConfig,
    validator: Validator,
}

impl Extractor {
    /// Creates an extractor with default client and extraction settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration used to build provider clients.
    #[must_use]
    pub fn with_client_config(mut self, config: ClientConfig) -> Self {
        self.client = config;
        self
    }

    /// Sets the repair turn configuration.
    #[must_use]
    pub fn with_extraction_config(mut self, config: ExtractionConfig) -> Self {
        self.extraction = config;
        self
    }

    /// Sets the maximum number of attempts (fluent shorthand).
    #[must_use]
    pub const fn max_attempts(mut self, max: usize) -> Self {
        self.extraction.max_attempts = max;
        self
    }

    /// Sets the validator used on model answers.
    #[must_use]
    pub const fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Runs the pipeline against the provider named by `provider`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for empty text or target language
    /// - [`Error::UnsupportedProvider`] for an unknown provider key
    /// - [`Error::MissingCredential`] when no API key is available
    /// - [`Error::ProviderRequest`] when the call itself fails
    /// - [`Error::MalformedResponse`] / [`Error::SchemaValidation`] when the answer is unusable
    ///
    /// The first three are raised before any network traffic.
    pub async fn extract_and_translate(
        &self,
        text: &str,
        target_language: &str,
        provider: &str,
    ) -> Result<ExtractionResult, Error> {
        check_input(text, target_language)?;
        let provider: Provider = provider.parse()?;
        self.extract_with_provider(text, target_language, provider)
            .await
    }

    /// Same as [`Self::extract_and_translate`] with an already parsed provider.
    ///
    /// # Errors
    ///
    /// See [`Self::extract_and_translate`].
    pub async fn extract_with_provider(
        &self,
        text: &str,
        target_language: &str,
        provider: Provider,
    ) -> Result<ExtractionResult, Error> {
        check_input(text, target_language)?;
        let client = ProviderClient::connect(provider, &self.client)?;
        self.extract_with_client(&client, text, target_language)
            .await
    }

    /// Runs the pipeline against any [`ModelClient`].
    ///
    /// Sends one request per attempt. The last attempt's error is returned
    /// unmodified.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`], or whatever the client, the JSON parser or the
    /// validator reports.
    pub async fn extract_with_client<C>(
        &self,
        client: &C,
        text: &str,
        target_language: &str,
    ) -> Result<ExtractionResult, Error>
    where
        C: ModelClient + ?Sized,
    {
        check_input(text, target_language)?;

        let start = Instant::now();
        let base_instructions = build_instructions(target_language);
        let schema = self
            .extraction
            .include_schema_in_feedback
            .then(extraction_schema);
        let max_attempts = self.extraction.max_attempts.max(1);
        let mut instructions = base_instructions.clone();
        let mut attempt = 1;

        loop {
            tracing::debug!(attempt, max_attempts, "Sending extraction request");
            let raw = client.send(&instructions, text).await?;

            let feedback = match parse_model_output(&raw) {
                Ok(value) => match self.accept(&value, text) {
                    Ok(record) => {
                        tracing::info!(
                            attempt,
                            names = record.names().len(),
                            emails = record.emails().len(),
                            birth_dates = record.birth_dates().len(),
                            urls = record.urls().len(),
                            elapsed_ms = u64::try_from(start.elapsed().as_millis())
                                .unwrap_or(u64::MAX),
                            "Extraction succeeded"
                        );
                        return Ok(record);
                    }
                    Err(err) if attempt >= max_attempts => return Err(err.into()),
                    Err(err) => {
                        let mut violations = self.validator.collect_violations(&value);
                        if violations.is_empty() {
                            violations.push(err);
                        }
                        build_validation_feedback(
                            schema.as_ref(),
                            &value,
                            &violations,
                            attempt,
                            max_attempts,
                        )
                    }
                },
                Err(err) if attempt >= max_attempts => {
                    return Err(Error::MalformedResponse {
                        message: err.to_string(),
                        raw,
                    });
                }
                Err(err) => build_parse_error_feedback(
                    &raw,
                    &err.to_string(),
                    attempt,
                    max_attempts,
                    schema.as_ref(),
                ),
            };

            tracing::warn!(attempt, max_attempts, "Model answer rejected, sending repair turn");
            instructions = format!("{base_instructions}\n\n{feedback}");
            attempt += 1;
        }
    }

    fn accept(&self, value: &Value, text: &str) -> Result<ExtractionResult, SchemaValidationError> {
        let record = self.validator.validate(value)?;
        if record.full_text().trim() != text.trim() {
            return Err(SchemaValidationError::new(
                "full_text",
                "does not reproduce the input text verbatim",
            ));
        }
        Ok(record)
    }
}

fn check_input(text: &str, target_language: &str) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("text must not be empty".to_string()));
    }
    if target_language.trim().is_empty() {
        return Err(Error::InvalidInput(
            "target language must not be empty".to_string(),
        ));
    }
    Ok(())
}
