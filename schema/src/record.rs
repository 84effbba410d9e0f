//! The validated extraction record.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::validate::validate;

/// Names of the seven record fields, in declaration order.
pub const FIELD_NAMES: [&str; 7] = [
    "full_text",
    "names",
    "emails",
    "birth_dates",
    "urls",
    "translated_full_text",
    "translated_names",
];

/// Structured data extracted from a text, plus its translation.
///
/// Only produced by the validator: the fields are private and there is no
/// public constructor, so every value in circulation satisfies the contract.
/// Deserializing runs the same validation as [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ExtractionResult {
    /// The complete input text, verbatim. Never empty.
    pub(crate) full_text: String,
    /// Person names found in the text, in order of appearance.
    pub(crate) names: Vec<String>,
    /// Email addresses found in the text.
    pub(crate) emails: Vec<String>,
    /// Birth dates found in the text, formatted as YYYY-MM-DD. Leave out dates
    /// that cannot be read as a valid calendar date.
    pub(crate) birth_dates: Vec<String>,
    /// Absolute URLs (scheme and host) found in the text.
    pub(crate) urls: Vec<String>,
    /// The full text translated into the target language. Never empty.
    pub(crate) translated_full_text: String,
    /// The names translated into the target language; keep a name unchanged
    /// when it has no translation.
    pub(crate) translated_names: Vec<String>,
}

impl ExtractionResult {
    /// The verbatim input text.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Detected person names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Detected email addresses.
    #[must_use]
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// Detected birth dates, each a valid `YYYY-MM-DD` calendar date.
    #[must_use]
    pub fn birth_dates(&self) -> &[String] {
        &self.birth_dates
    }

    /// Detected absolute URLs.
    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Translation of [`full_text`](Self::full_text).
    #[must_use]
    pub fn translated_full_text(&self) -> &str {
        &self.translated_full_text
    }

    /// Translated forms of [`names`](Self::names).
    #[must_use]
    pub fn translated_names(&self) -> &[String] {
        &self.translated_names
    }
}

impl<'de> Deserialize<'de> for ExtractionResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        validate(&value).map_err(serde::de::Error::custom)
    }
}

/// JSON Schema document describing [`ExtractionResult`].
///
/// Embedded verbatim in the extraction prompt and in repair feedback.
#[must_use]
pub fn extraction_schema() -> Value {
    json!(schema_for!(ExtractionResult))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_field_as_required() {
        let schema = extraction_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        for field in FIELD_NAMES {
            assert!(required.contains(&field), "{field} not required");
            assert!(schema["properties"][field].is_object(), "{field} missing");
        }
    }

    #[test]
    fn test_schema_carries_field_descriptions() {
        let schema = extraction_schema();
        let description = schema["properties"]["birth_dates"]["description"]
            .as_str()
            .unwrap();
        assert!(description.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_deserialize_rejects_invalid_document() {
        let err = serde_json::from_str::<ExtractionResult>(r#"{"full_text": ""}"#).unwrap_err();
        assert!(err.to_string().contains("full_text"));
    }
}
