//! Pull a JSON object out of free-form model text.
//!
//! Models wrap JSON in code fences, prepend a sentence, or leave a trailing
//! comma behind. We take the span from the first `{` to the last `}` and, if
//! that does not parse, try once more with trailing commas removed.

use cd_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static RE_OBJECT_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

static RE_TRAILING_COMMA_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\}").unwrap());

static RE_TRAILING_COMMA_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\]").unwrap());

/// Return the first JSON object found in `text`.
pub fn extract_first_object(text: &str) -> Result<Map<String, Value>> {
    let span = RE_OBJECT_SPAN
        .find(text)
        .ok_or_else(|| Error::MalformedModelOutput("no JSON object in model reply".to_string()))?
        .as_str();

    let value = match serde_json::from_str::<Value>(span) {
        Ok(value) => value,
        Err(_) => {
            let cleaned = RE_TRAILING_COMMA_OBJECT.replace_all(span, "}");
            let cleaned = RE_TRAILING_COMMA_ARRAY.replace_all(&cleaned, "]");
            serde_json::from_str::<Value>(&cleaned)
                .map_err(|e| Error::MalformedModelOutput(format!("invalid JSON in model reply: {e}")))?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::MalformedModelOutput(format!(
            "expected a JSON object, found {other}"
        ))),
    }
}
