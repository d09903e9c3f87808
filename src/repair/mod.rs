//! Fallback extraction for JSON-shaped model output.
//!
//! Some responses carry the record as a JSON object instead of tags, and
//! mid-stream that object is usually truncated. The fallback locates the
//! object, parses it directly or after [`repair_json`], and maps the known
//! top-level keys onto [`FieldUpdate`]s.

mod json;

pub use json::repair_json;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::extract::parse_gas_estimate;
use crate::models::{Complexity, FieldUpdate, HookType};

/// Matches the opening of a `"hookCodeJson": {` member.
static HOOK_CODE_JSON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""hookCodeJson"\s*:\s*\{"#).expect("Invalid hookCodeJson regex")
});

/// Key holding a nested record object.
const NESTED_KEY: &str = "hookCodeJson";

/// Locate the JSON text to parse, if the buffer looks JSON-shaped.
///
/// Accepts a bare object, an object inside a Markdown code fence, or the
/// object value of a `hookCodeJson` member anywhere in the text.
pub fn json_candidate(buffer: &str) -> Option<&str> {
    let trimmed = buffer.trim();
    if trimmed.starts_with('{') {
        return Some(trimmed);
    }

    if let Some(fenced) = trimmed.strip_prefix("```") {
        let body = fenced.strip_prefix("json").unwrap_or(fenced).trim_start();
        let body = body.strip_suffix("```").unwrap_or(body).trim_end();
        if body.starts_with('{') {
            return Some(body);
        }
    }

    HOOK_CODE_JSON_REGEX
        .find(trimmed)
        .map(|m| &trimmed[m.end() - 1..])
}

/// Parse JSON directly, falling back to a repaired copy.
pub fn parse_lenient(text: &str) -> Option<Value> {
    serde_json::from_str(text)
        .ok()
        .or_else(|| serde_json::from_str(&repair_json(text)).ok())
}

/// Run the whole fallback path over `buffer`.
///
/// Returns `None` when the buffer is not JSON-shaped or cannot be parsed
/// even after repair; the caller keeps the buffer for the next attempt.
pub fn extract_json(buffer: &str) -> Option<Vec<FieldUpdate>> {
    let candidate = json_candidate(buffer)?;
    let value = parse_lenient(candidate)?;
    let object = record_object(&value)?;
    Some(updates_from_object(&object))
}

/// The object holding record keys, unwrapping a `hookCodeJson` member that
/// may itself be an object or a JSON string.
fn record_object(value: &Value) -> Option<Map<String, Value>> {
    let object = value.as_object()?;
    match object.get(NESTED_KEY) {
        Some(Value::Object(inner)) => Some(inner.clone()),
        Some(Value::String(inner)) => parse_lenient(inner)
            .and_then(|v| v.as_object().cloned())
            .or_else(|| Some(object.clone())),
        _ => Some(object.clone()),
    }
}

/// Map known keys to updates. Unknown keys, nulls and mistyped values are skipped.
pub fn updates_from_object(object: &Map<String, Value>) -> Vec<FieldUpdate> {
    let mut updates = Vec::new();

    if let Some(v) = string_field(object, "name") {
        updates.push(FieldUpdate::Name(v));
    }
    if let Some(v) = string_field(object, "description") {
        updates.push(FieldUpdate::Description(v));
    }
    if let Some(v) = string_field(object, "code").or_else(|| string_field(object, "hookCode")) {
        updates.push(FieldUpdate::Code(v));
    }
    if let Some(v) = string_field(object, "hookType").and_then(|s| HookType::parse(&s)) {
        updates.push(FieldUpdate::HookType(v));
    }
    if let Some(v) = object.get("gasEstimate").and_then(gas_value) {
        updates.push(FieldUpdate::GasEstimate(v));
    }
    if let Some(v) = string_field(object, "complexity").and_then(|s| Complexity::parse(&s)) {
        updates.push(FieldUpdate::Complexity(v));
    }
    if let Some(v) = string_list(object, "functionalities") {
        updates.push(FieldUpdate::Functionalities(v));
    }
    if let Some(v) = string_list(object, "dependencies") {
        updates.push(FieldUpdate::Dependencies(v));
    }
    if let Some(v) = string_field(object, "testCode") {
        updates.push(FieldUpdate::TestCode(v));
    }
    if let Some(v) = string_list(object, "examples") {
        updates.push(FieldUpdate::Examples(v));
    }
    if let Some(v) = string_field(object, "version") {
        updates.push(FieldUpdate::Version(v));
    }
    if let Some(v) = string_field(object, "author") {
        updates.push(FieldUpdate::Author(v));
    }
    if let Some(v) = string_field(object, "timestamp") {
        updates.push(FieldUpdate::Timestamp(v));
    }

    updates
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Array entries as strings; objects contribute their `name` member.
fn string_list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = object.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Object(o) => o.get("name").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn gas_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => parse_gas_estimate(s),
        _ => None,
    }
}
