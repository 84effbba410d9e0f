//! Field-level validation of model output into an [`ExtractionResult`].
//!
//! Fields are checked in declaration order. [`Validator::validate`] stops at
//! the first violation; [`Validator::collect_violations`] reports all of them.
//! Birth dates with the right shape but an impossible calendar value are
//! filtered out rather than rejected.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SchemaValidationError;
use crate::record::{ExtractionResult, FIELD_NAMES};

#[allow(clippy::expect_used)]
static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

#[allow(clippy::expect_used)]
static RE_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Policy for keys that are not one of the seven record fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtraKeys {
    /// Unknown keys are ignored.
    #[default]
    Ignore,
    /// The first unknown key fails validation.
    Reject,
}

/// Validates JSON documents against the extraction record contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    extra_keys: ExtraKeys,
}

/// Validates `value` with the default (lenient) policy.
///
/// # Examples
///
/// ```
/// use llm_extract_schema::validate;
/// use serde_json::json;
///
/// let err = validate(&json!({"names": []})).unwrap_err();
/// assert_eq!(err.path, "full_text");
/// ```
pub fn validate(value: &Value) -> Result<ExtractionResult, SchemaValidationError> {
    Validator::new().validate(value)
}

impl Validator {
    /// Creates a validator that ignores unknown keys.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            extra_keys: ExtraKeys::Ignore,
        }
    }

    /// Sets the policy for unknown keys.
    #[must_use]
    pub const fn extra_keys(mut self, policy: ExtraKeys) -> Self {
        self.extra_keys = policy;
        self
    }

    /// Builds an [`ExtractionResult`] from `value`, failing on the first violation.
    pub fn validate(&self, value: &Value) -> Result<ExtractionResult, SchemaValidationError> {
        let object = value
            .as_object()
            .ok_or_else(|| SchemaValidationError::wrong_type("$", "an object", value))?;

        let full_text = non_empty_text(object, "full_text")?;
        let names = text_list(object, "names")?;
        let emails = text_list(object, "emails")?;
        check_each(&emails, "emails", check_email)?;
        let birth_dates = calendar_dates(text_list(object, "birth_dates")?)?;
        let urls = text_list(object, "urls")?;
        check_each(&urls, "urls", check_absolute_url)?;
        let translated_full_text = non_empty_text(object, "translated_full_text")?;
        let translated_names = text_list(object, "translated_names")?;

        if self.extra_keys == ExtraKeys::Reject {
            if let Some(key) = unknown_keys(object).next() {
                return Err(SchemaValidationError::new(key, "unexpected field"));
            }
        }

        Ok(ExtractionResult {
            full_text,
            names,
            emails,
            birth_dates,
            urls,
            translated_full_text,
            translated_names,
        })
    }

    /// Returns every violation in `value`, in field order.
    ///
    /// Within a list, elements are reported by index: a non-string element as
    /// a type error, a string element that fails its field's format check as a
    /// format error. An empty result means [`validate`](Self::validate) would
    /// succeed.
    #[must_use]
    pub fn collect_violations(&self, value: &Value) -> Vec<SchemaValidationError> {
        let Some(object) = value.as_object() else {
            return vec![SchemaValidationError::wrong_type("$", "an object", value)];
        };

        let mut violations = Vec::new();
        for field in FIELD_NAMES {
            if matches!(field, "full_text" | "translated_full_text") {
                if let Err(e) = non_empty_text(object, field) {
                    violations.push(e);
                }
                continue;
            }

            let items = match list(object, field) {
                Ok(items) => items,
                Err(e) => {
                    violations.push(e);
                    continue;
                }
            };
            let check = format_check(field);
            for (i, item) in items.iter().enumerate() {
                let path = format!("{field}[{i}]");
                match (item.as_str(), check) {
                    (None, _) => {
                        violations.push(SchemaValidationError::wrong_type(path, "a string", item));
                    }
                    (Some(text), Some(check)) => {
                        if let Err(reason) = check(text) {
                            violations.push(SchemaValidationError::new(path, reason));
                        }
                    }
                    (Some(_), None) => {}
                }
            }
        }

        if self.extra_keys == ExtraKeys::Reject {
            violations.extend(
                unknown_keys(object)
                    .map(|key| SchemaValidationError::new(key, "unexpected field")),
            );
        }

        violations
    }
}

/// The per-element format check of a list field, if it has one.
fn format_check(field: &str) -> Option<fn(&str) -> Result<(), String>> {
    match field {
        "emails" => Some(check_email),
        "urls" => Some(check_absolute_url),
        "birth_dates" => Some(check_date_shape),
        _ => None,
    }
}

fn unknown_keys(object: &Map<String, Value>) -> impl Iterator<Item = &str> {
    object
        .keys()
        .map(String::as_str)
        .filter(|key| !FIELD_NAMES.contains(key))
}

fn field<'a>(
    object: &'a Map<String, Value>,
    name: &str,
) -> Result<&'a Value, SchemaValidationError> {
    object
        .get(name)
        .ok_or_else(|| SchemaValidationError::missing(name))
}

fn non_empty_text(
    object: &Map<String, Value>,
    name: &str,
) -> Result<String, SchemaValidationError> {
    let value = field(object, name)?;
    let text = value
        .as_str()
        .ok_or_else(|| SchemaValidationError::wrong_type(name, "a string", value))?;
    if text.trim().is_empty() {
        return Err(SchemaValidationError::new(name, "must not be empty"));
    }
    Ok(text.to_owned())
}

fn text_list(
    object: &Map<String, Value>,
    name: &str,
) -> Result<Vec<String>, SchemaValidationError> {
    list(object, name)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                SchemaValidationError::wrong_type(format!("{name}[{i}]"), "a string", item)
            })
        })
        .collect()
}

fn list<'a>(
    object: &'a Map<String, Value>,
    name: &str,
) -> Result<&'a Vec<Value>, SchemaValidationError> {
    let value = field(object, name)?;
    value
        .as_array()
        .ok_or_else(|| SchemaValidationError::wrong_type(name, "an array of strings", value))
}

fn check_each(
    items: &[String],
    name: &str,
    check: fn(&str) -> Result<(), String>,
) -> Result<(), SchemaValidationError> {
    for (i, item) in items.iter().enumerate() {
        check(item)
            .map_err(|reason| SchemaValidationError::new(format!("{name}[{i}]"), reason))?;
    }
    Ok(())
}

fn check_email(candidate: &str) -> Result<(), String> {
    if RE_EMAIL.is_match(candidate) {
        Ok(())
    } else {
        Err(format!("'{candidate}' is not a valid email address"))
    }
}

fn check_absolute_url(candidate: &str) -> Result<(), String> {
    match url::Url::parse(candidate) {
        Ok(parsed) if parsed.has_host() => Ok(()),
        Ok(_) => Err(format!("'{candidate}' has no host")),
        Err(e) => Err(format!("'{candidate}' is not an absolute URL: {e}")),
    }
}

fn check_date_shape(candidate: &str) -> Result<(), String> {
    if RE_DATE_SHAPE.is_match(candidate) {
        Ok(())
    } else {
        Err(format!("'{candidate}' is not formatted as YYYY-MM-DD"))
    }
}

/// Keeps dates that exist on the calendar.
///
/// Entries that are not shaped like `YYYY-MM-DD` are an error; well-shaped
/// entries naming an impossible day are dropped.
fn calendar_dates(dates: Vec<String>) -> Result<Vec<String>, SchemaValidationError> {
    let mut kept = Vec::with_capacity(dates.len());
    for (i, date) in dates.into_iter().enumerate() {
        check_date_shape(&date)
            .map_err(|reason| SchemaValidationError::new(format!("birth_dates[{i}]"), reason))?;
        if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok() {
            kept.push(date);
        } else {
            tracing::debug!(
                date = %date,
                index = i,
                "Dropping birth date that is not a calendar date"
            );
        }
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "full_text": "Contact John Doe at john@example.com. Born 1990-07-14. \
                Website: https://example.com.",
            "names": ["John Doe"],
            "emails": ["john@example.com"],
            "birth_dates": ["1990-07-14"],
            "urls": ["https://example.com"],
            "translated_full_text": "Kontakta John Doe på john@example.com. Född 1990-07-14. \
                Webbplats: https://example.com.",
            "translated_names": ["John Doe"]
        })
    }

    #[test]
    fn test_valid_document_is_accepted() {
        let record = validate(&sample()).unwrap();
        assert_eq!(record.emails(), ["john@example.com"]);
        assert_eq!(record.birth_dates(), ["1990-07-14"]);
        assert_eq!(record.urls(), ["https://example.com"]);
    }

    #[test]
    fn test_non_object_fails_at_root() {
        let err = validate(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err.path, "$");
        assert!(err.reason.contains("array"));
    }

    #[test]
    fn test_impossible_dates_are_filtered() {
        let mut value = sample();
        value["birth_dates"] = json!(["1990-13-40", "2023-02-29", "2024-02-29"]);
        let record = validate(&value).unwrap();
        assert_eq!(record.birth_dates(), ["2024-02-29"]);
    }

    #[test]
    fn test_misshapen_date_is_rejected() {
        let mut value = sample();
        value["birth_dates"] = json!(["1990-07-14", "July 14, 1990"]);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path, "birth_dates[1]");
        assert!(err.reason.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_non_string_element_reports_index() {
        let mut value = sample();
        value["names"] = json!(["John Doe", 7]);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path, "names[1]");
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut value = sample();
        value["emails"] = json!(["john at example dot com"]);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path, "emails[0]");
    }

    #[test]
    fn test_relative_url_is_rejected() {
        for bad in ["/about", "example.com", "mailto:john@example.com"] {
            let mut value = sample();
            value["urls"] = json!([bad]);
            let err = validate(&value).unwrap_err();
            assert_eq!(err.path, "urls[0]", "{bad} accepted");
        }
    }

    #[test]
    fn test_whitespace_only_translation_is_rejected() {
        let mut value = sample();
        value["translated_full_text"] = json!("   ");
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path, "translated_full_text");
    }

    #[test]
    fn test_extra_keys_policy() {
        let mut value = sample();
        value["confidence"] = json!(0.9);

        assert!(Validator::new().validate(&value).is_ok());

        let err = Validator::new()
            .extra_keys(ExtraKeys::Reject)
            .validate(&value)
            .unwrap_err();
        assert_eq!(err.path, "confidence");
    }

    #[test]
    fn test_collect_violations_reports_everything() {
        let value = json!({
            "full_text": "",
            "names": "John",
            "emails": ["nope", "ok@example.com", 3],
            "birth_dates": ["1990-13-40", "14/07/1990"],
            "urls": ["https://example.com"],
            "translated_names": []
        });

        let paths: Vec<String> = Validator::new()
            .collect_violations(&value)
            .into_iter()
            .map(|e| e.path)
            .collect();

        assert_eq!(
            paths,
            [
                "full_text",
                "names",
                "emails[0]",
                "emails[2]",
                "birth_dates[1]",
                "translated_full_text"
            ]
        );
    }

    #[test]
    fn test_collect_violations_checks_strings_beside_non_strings() {
        let mut value = sample();
        value["emails"] = json!(["nope", 3]);

        let paths: Vec<String> = Validator::new()
            .collect_violations(&value)
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(paths, ["emails[0]", "emails[1]"]);

        // Fail-fast validation still stops at the first bad address.
        value["emails"] = json!(["nope", "ok@example.com"]);
        assert_eq!(validate(&value).unwrap_err().path, "emails[0]");
    }

    #[test]
    fn test_collect_violations_empty_for_valid_document() {
        assert!(Validator::new().collect_violations(&sample()).is_empty());
    }
}
