//! Public error types for llm-extract.

use llm_extract_schema::SchemaValidationError;
use thiserror::Error;

use crate::provider::Provider;

/// Errors that can occur during an extraction call.
///
/// Every failure reaches the caller unmodified: nothing is retried or
/// downgraded, except by the opt-in repair turn of
/// [`ExtractionConfig`](crate::config::ExtractionConfig). Callers branch on the
/// variant, or on [`Error::kind`].
#[derive(Debug, Error)]
pub enum Error {
    /// The caller's text or target language is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider key is not one of `anthropic`, `google` or `openai`.
    #[error("Unsupported provider '{0}'. Supported: anthropic, google, openai")]
    UnsupportedProvider(String),

    /// No API key is available for the selected provider.
    #[error("No API key for {provider}. Set {env_var}")]
    MissingCredential {
        /// The selected provider.
        provider: Provider,
        /// The environment variable that was consulted.
        env_var: &'static str,
    },

    /// The provider call failed (transport, non-success status, timeout, or an unusable envelope).
    #[error("{provider} request failed: {message}")]
    ProviderRequest {
        /// The provider that was called.
        provider: Provider,
        /// Description of the failure from the provider client.
        message: String,
    },

    /// The model's answer is not parseable as JSON.
    #[error("Model response is not valid JSON: {message}")]
    MalformedResponse {
        /// Parser error message.
        message: String,
        /// The raw model output.
        raw: String,
    },

    /// The model's JSON does not satisfy the extraction record contract.
    #[error("Model response failed validation: {0}")]
    SchemaValidation(#[from] SchemaValidationError),
}

/// Fieldless discriminant of [`Error`], for branching and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidInput`].
    InvalidInput,
    /// See [`Error::UnsupportedProvider`].
    UnsupportedProvider,
    /// See [`Error::MissingCredential`].
    MissingCredential,
    /// See [`Error::ProviderRequest`].
    ProviderRequest,
    /// See [`Error::MalformedResponse`].
    MalformedResponse,
    /// See [`Error::SchemaValidation`].
    SchemaValidation,
}

impl Error {
    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::UnsupportedProvider(_) => ErrorKind::UnsupportedProvider,
            Self::MissingCredential { .. } => ErrorKind::MissingCredential,
            Self::ProviderRequest { .. } => ErrorKind::ProviderRequest,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::SchemaValidation(_) => ErrorKind::SchemaValidation,
        }
    }

    pub(crate) fn provider_request(provider: Provider, error: &impl std::fmt::Display) -> Self {
        Self::ProviderRequest {
            provider,
            message: error.to_string(),
        }
    }
}
