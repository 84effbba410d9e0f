//! Turning raw model output into JSON.

use serde_json::Value;

/// Removes one surrounding Markdown code fence, if present.
///
/// The info string on the opening fence (e.g. `json`) is dropped. Text without
/// a complete fence is returned trimmed and otherwise untouched.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    body.split_once('\n').map_or(body, |(_, inner)| inner).trim()
}

/// Parses model output as a JSON value, tolerating one surrounding code fence.
///
/// # Errors
///
/// Returns the parser error when the (unfenced) text is not valid JSON.
pub fn parse_model_output(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fence(raw))
}
