//! Validation error carrying the offending field path.

use thiserror::Error;

/// The parsed JSON does not satisfy the extraction record contract.
///
/// `path` names the offending location: `$` for the document itself, a field
/// name such as `full_text`, or an indexed element such as `emails[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("At path '{path}': {reason}")]
pub struct SchemaValidationError {
    /// Location of the violation inside the submitted document.
    pub path: String,
    /// Human-readable description of what is wrong.
    pub reason: String,
}

impl SchemaValidationError {
    /// Creates an error for the given path and reason.
    #[must_use]
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Error for a required field that is absent from the document.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::new(field, "missing required field")
    }

    /// Error for a value whose JSON type does not match the declared type.
    #[must_use]
    pub fn wrong_type(path: impl Into<String>, expected: &str, found: &serde_json::Value) -> Self {
        Self::new(
            path,
            format!("expected {expected}, found {}", json_type_name(found)),
        )
    }
}

/// Name of a JSON value's type as it appears in error messages.
pub(crate) const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_includes_path_and_reason() {
        let err = SchemaValidationError::missing("names");
        assert_eq!(err.to_string(), "At path 'names': missing required field");
    }

    #[test]
    fn test_wrong_type_names_found_type() {
        let err = SchemaValidationError::wrong_type("emails[0]", "a string", &json!(42));
        assert_eq!(err.path, "emails[0]");
        assert_eq!(err.reason, "expected a string, found number");
    }
}
