//! # llm-extract
//!
//! Extract people's names, email addresses, birth dates and URLs from free
//! text, and translate the text into a target language, by asking a hosted
//! language model (Anthropic, Google Gemini or `OpenAI`) for a JSON answer
//! and validating it into an [`ExtractionResult`].
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> Result<(), llm_extract::Error> {
//! // Reads ANTHROPIC_API_KEY from the environment
//! let record = llm_extract::extract_and_translate(
//!     "Contact John Doe at john@example.com. Born 1990-07-14.",
//!     "Swedish",
//!     "anthropic",
//! )
//! .await?;
//!
//! println!("{}", record.translated_full_text());
//! # Ok(())
//! # }
//! ```
//!
//! Use [`Extractor`] to override the model, base URL, timeout or credential,
//! or to enable the repair turn:
//!
//! ```no_run
//! # use llm_extract::prelude::*;
//! # async fn example() -> Result<(), Error> {
//! let extractor = Extractor::new()
//!     .with_client_config(ClientConfig::new().with_model("gpt-4o"))
//!     .max_attempts(2);
//!
//! let record = extractor
//!     .extract_with_provider("Ana Lima, ana@lima.pt", "German", Provider::OpenAi)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

/// Anthropic provider over Rig.
pub mod anthropic;

/// Google Gemini provider over Rig.
pub mod gemini;

/// `OpenAI` provider over Rig.
pub mod openai;

/// Client and extraction configuration.
pub mod config;

/// API key lookup.
pub mod credential;

/// Public error types.
pub mod errors;

/// The extraction pipeline.
pub mod orchestrator;

/// Instruction template.
pub mod prompt;

/// Provider selection and the [`ModelClient`] trait.
pub mod provider;

/// Model output parsing.
pub mod response;

mod request;

/// Commonly used types and traits.
pub mod prelude;

pub use config::{ClientConfig, ExtractionConfig};
pub use errors::{Error, ErrorKind};
pub use orchestrator::{extract_and_translate, Extractor};
pub use provider::{ModelClient, Provider, ProviderClient};

pub use llm_extract_schema::{
    extraction_schema, validate, ExtraKeys, ExtractionResult, SchemaValidationError, Validator,
};
