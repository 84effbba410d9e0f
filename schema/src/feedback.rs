//! Feedback text for the repair turn, sent when a model's answer was rejected.

use serde_json::Value;

use crate::error::SchemaValidationError;

const RAW_PREVIEW_CHARS: usize = 500;

/// Build validation feedback for a submission that parsed but broke the contract.
///
/// Includes:
/// - Attempt counter (e.g., "Attempt 1/2")
/// - Every violation with its field path
/// - The expected schema, when provided
/// - The echoed submission, so the model can compare
///
/// # Examples
///
/// ```
/// use llm_extract_schema::{build_validation_feedback, SchemaValidationError};
/// use serde_json::json;
///
/// let errors = vec![SchemaValidationError::missing("urls")];
/// let feedback = build_validation_feedback(None, &json!({}), &errors, 1, 2);
/// assert!(feedback.contains("Attempt 1/2"));
/// assert!(feedback.contains("At path 'urls'"));
/// ```
#[must_use]
pub fn build_validation_feedback(
    schema: Option<&Value>,
    instance: &Value,
    errors: &[SchemaValidationError],
    attempt: usize,
    max_attempts: usize,
) -> String {
    let mut feedback = format!(
        "Attempt {attempt}/{max_attempts}: your JSON did not match the required format.\n\n"
    );

    feedback.push_str("Errors:\n");
    for error in errors {
        feedback.push_str("  - ");
        feedback.push_str(&error.to_string());
        feedback.push('\n');
    }

    push_schema(&mut feedback, schema);

    feedback.push_str("\n\nYour submission:\n");
    let instance_str =
        serde_json::to_string_pretty(instance).unwrap_or_else(|_| instance.to_string());
    feedback.push_str(&instance_str);

    feedback.push_str("\n\nFix every error and answer again with the corrected JSON object only.");

    feedback
}

/// Build feedback for an answer that could not be parsed as JSON at all.
///
/// The raw answer is echoed back truncated to its first 500 characters.
#[must_use]
pub fn build_parse_error_feedback(
    raw_text: &str,
    parse_error: &str,
    attempt: usize,
    max_attempts: usize,
    schema: Option<&Value>,
) -> String {
    let mut feedback =
        format!("Attempt {attempt}/{max_attempts}: your answer could not be parsed as JSON.\n\n");

    feedback.push_str("Parse error: ");
    feedback.push_str(parse_error);
    feedback.push_str("\n\n");

    feedback.push_str("Your answer (first 500 chars):\n");
    feedback.push_str(&truncate_chars(raw_text, RAW_PREVIEW_CHARS));

    push_schema(&mut feedback, schema);

    feedback.push_str("\n\nAnswer with a single valid JSON object and nothing else.");

    feedback
}

fn push_schema(feedback: &mut String, schema: Option<&Value>) {
    if let Some(schema) = schema {
        feedback.push_str("\nExpected schema:\n");
        let schema_str =
            serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
        feedback.push_str(&schema_str);
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((boundary, _)) => format!("{}...", &text[..boundary]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_validation_feedback() {
        let schema = json!({"type": "object"});
        let instance = json!({"full_text": ""});
        let errors = vec![SchemaValidationError::new("full_text", "must not be empty")];

        let feedback = build_validation_feedback(Some(&schema), &instance, &errors, 1, 3);

        assert!(feedback.contains("Attempt 1/3"));
        assert!(feedback.contains("Errors:"));
        assert!(feedback.contains("At path 'full_text': must not be empty"));
        assert!(feedback.contains("Expected schema:"));
        assert!(feedback.contains("Your submission:"));
    }

    #[test]
    fn test_validation_feedback_without_schema() {
        let feedback = build_validation_feedback(None, &json!({}), &[], 2, 2);
        assert!(!feedback.contains("Expected schema:"));
    }

    #[test]
    fn test_build_parse_error_feedback() {
        let feedback = build_parse_error_feedback("Sure! Here it is", "expected value", 2, 3, None);

        assert!(feedback.contains("Attempt 2/3"));
        assert!(feedback.contains("could not be parsed"));
        assert!(feedback.contains("Parse error: expected value"));
        assert!(feedback.contains("Sure! Here it is"));
    }

    #[test]
    fn test_parse_error_feedback_truncates_on_char_boundary() {
        let raw_text = "å".repeat(1000);
        let feedback = build_parse_error_feedback(&raw_text, "error", 1, 3, None);

        let section = feedback.split("first 500 chars):\n").nth(1).unwrap();
        let echoed = section.split("\n\n").next().unwrap();
        assert_eq!(echoed.chars().count(), 503);
        assert!(echoed.ends_with("..."));
    }
}
