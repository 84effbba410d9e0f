//! Common imports for llm-extract usage.
//!
//! ```
//! use llm_extract::prelude::*;
//! ```

pub use crate::config::{ClientConfig, ExtractionConfig};
pub use crate::errors::{Error, ErrorKind};
pub use crate::orchestrator::{extract_and_translate, Extractor};
pub use crate::provider::{ModelClient, Provider, ProviderClient};

pub use llm_extract_schema::{ExtraKeys, ExtractionResult, SchemaValidationError, Validator};
