//! Record shape and validation contract for structured extraction.
//!
//! This crate is the one place where untrusted model output is given a hard
//! contract before anything else touches it:
//!
//! - [`ExtractionResult`] - The validated, immutable extraction record
//! - [`validate`] / [`Validator`] - Per-field checks producing the record
//! - [`SchemaValidationError`] - Field path plus human-readable reason
//! - [`extraction_schema`] - JSON Schema document of the record
//! - [`feedback`] - Repair-turn feedback text for a model that got it wrong
//!
//! ```
//! use llm_extract_schema::validate;
//! use serde_json::json;
//!
//! let value = json!({
//!     "full_text": "Contact John Doe at john@example.com.",
//!     "names": ["John Doe"],
//!     "emails": ["john@example.com"],
//!     "birth_dates": [],
//!     "urls": [],
//!     "translated_full_text": "Kontakta John Doe på john@example.com.",
//!     "translated_names": ["John Doe"]
//! });
//!
//! let record = validate(&value).unwrap();
//! assert_eq!(record.names(), ["John Doe"]);
//! ```

pub mod error;
pub mod feedback;
pub mod record;
pub mod validate;

pub use error::SchemaValidationError;
pub use feedback::{build_parse_error_feedback, build_validation_feedback};
pub use record::{extraction_schema, ExtractionResult, FIELD_NAMES};
pub use validate::{validate, ExtraKeys, Validator};
