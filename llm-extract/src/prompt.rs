//! The fixed instruction template sent as the system turn.

use llm_extract_schema::extraction_schema;

const INSTRUCTIONS: &str = "\
You extract structured data from a text and translate it.

The user message is the text to process. Answer with a single JSON object and \
nothing else: no prose, no Markdown. The object must satisfy this JSON Schema:

{schema}

Fill the fields as follows:
- full_text: the user message, copied verbatim.
- names: every person name mentioned in the text, in order of appearance.
- emails: every email address in the text.
- birth_dates: every birth date in the text, written as YYYY-MM-DD.
- urls: every absolute URL in the text, including the scheme.
- translated_full_text: the whole text translated into {language}.
- translated_names: the names rendered in {language}, in the same order as names.

Use an empty list for a field with no matches. Keep all seven keys.";

/// Builds the system instructions for `target_language`.
///
/// Pure substitution into a fixed template; the record's JSON Schema is
/// embedded verbatim.
#[must_use]
pub fn build_instructions(target_language: &str) -> String {
    let schema = serde_json::to_string_pretty(&extraction_schema())
        .unwrap_or_else(|_| extraction_schema().to_string());
    INSTRUCTIONS
        .replace("{schema}", &schema)
        .replace("{language}", target_language.trim())
}
