//! Recovery of structured values from free-text model output.
//!
//! Model answers are expected to hold one JSON value but often arrive wrapped
//! in fenced code blocks, with only a closing fence, surrounded by prose, or
//! with a trailing comma before the final bracket. Parsing never fails: an
//! unrecoverable answer yields `None` (or an empty list), and fields of the
//! wrong type are replaced by their neutral default.
//!
//! # Span selection
//!
//! 1. Text between a ```` ```json ```` fence and the next closing fence.
//! 2. Otherwise, text before the last closing fence.
//! 3. The outermost `[...]` or `{...}` span, ignoring fences.
//!
//! Each span is parsed once as-is and once with a trailing comma removed.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::record::{ImageDetails, PartialRecord, Weekday};
use crate::schema::{FieldKind, PLACEHOLDER_SENTINEL, VENUE_RECORD_FIELDS};

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json(.+?)```").expect("static regex"));

static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(.+)```").expect("static regex"));

/// Top-level JSON kind the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    List,
    Object,
}

impl JsonShape {
    fn brackets(self) -> (char, char) {
        match self {
            Self::List => ('[', ']'),
            Self::Object => ('{', '}'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::List => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// Locate and parse the JSON value of the expected shape in `text`.
///
/// Returns `None` when no strategy yields a value of that shape.
pub fn extract_json(text: &str, shape: JsonShape) -> Option<Value> {
    let fenced = JSON_FENCE
        .captures(text)
        .or_else(|| CLOSING_FENCE.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    let bracketed = bracketed_span(text, shape);

    for span in fenced.into_iter().chain(bracketed) {
        if let Some(value) = parse_with_repair(span.trim())
            && shape.matches(&value)
        {
            return Some(value);
        }
    }

    warn!(?shape, "no valid JSON found in model output");
    trace!(output = %text, "unparsable model output");
    None
}

/// Parse a list of strings, dropping non-string elements.
pub fn parse_string_list(text: &str) -> Vec<String> {
    let Some(Value::Array(items)) = extract_json(text, JsonShape::List) else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// Parse a list of names or search queries. Entries are trimmed; blanks and
/// template placeholders echoed back by the model are dropped.
pub fn parse_listing(text: &str) -> Vec<String> {
    parse_string_list(text)
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty() && !entry.starts_with(PLACEHOLDER_SENTINEL))
        .collect()
}

/// Parse a venue record fragment, coercing each field to its expected shape.
pub fn parse_record_fragment(text: &str) -> Option<PartialRecord> {
    let Value::Object(raw) = extract_json(text, JsonShape::Object)? else {
        return None;
    };

    let mut coerced = Map::new();
    for field in VENUE_RECORD_FIELDS {
        let value = coerce(field.kind, field.name, raw.get(field.name));
        coerced.insert(field.name.to_string(), value);
    }

    match serde_json::from_value(Value::Object(coerced)) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "coerced record did not match record shape");
            None
        }
    }
}

/// Parse a caption answer into caption text and hashtags.
pub fn parse_image_details(text: &str) -> Option<ImageDetails> {
    let Value::Object(raw) = extract_json(text, JsonShape::Object)? else {
        return None;
    };

    let caption = match raw.get("caption") {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    let hashtags = match raw.get("hashtags") {
        Some(Value::Array(items)) => strings_only(items),
        _ => Vec::new(),
    };

    Some(ImageDetails { caption, hashtags })
}

// ── Span handling ──

fn bracketed_span(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.brackets();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    // Need at least one character between the brackets.
    (end > start + 1).then(|| &text[start..=end])
}

fn parse_with_repair(span: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(span) {
        return Some(value);
    }
    let repaired = strip_trailing_comma(span)?;
    debug!("retrying JSON parse without trailing comma");
    serde_json::from_str(&repaired).ok()
}

/// Remove a single comma directly (modulo whitespace) before the final
/// closing bracket or brace.
fn strip_trailing_comma(span: &str) -> Option<String> {
    let close = span.rfind(['}', ']'])?;
    let before = span[..close].trim_end();
    let comma = before.strip_suffix(',')?;
    Some(format!("{comma}{}", &span[before.len()..]))
}

// ── Field coercion ──

fn coerce(kind: FieldKind, name: &str, value: Option<&Value>) -> Value {
    match kind {
        FieldKind::Text => coerce_text(name, value),
        FieldKind::Hours => coerce_hours(value),
        FieldKind::Offerings => coerce_list(name, value, coerce_offering),
        FieldKind::Images => coerce_list(name, value, coerce_image),
    }
}

fn coerce_text(name: &str, value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::Null,
        Some(Value::String(s)) => Value::String(s.clone()),
        Some(other) => {
            debug!(field = name, found = %other, "defaulting mistyped text field");
            Value::String(String::new())
        }
    }
}

fn coerce_hours(value: Option<&Value>) -> Value {
    let days = value.and_then(Value::as_object);
    let mut week = Map::new();
    for day in Weekday::ALL {
        let interval = days
            .and_then(|d| d.get(day.as_str()))
            .and_then(Value::as_object);
        let mut out = Map::new();
        out.insert("start".into(), sub_text(interval, "start"));
        out.insert("end".into(), sub_text(interval, "end"));
        week.insert(day.as_str().into(), Value::Object(out));
    }
    Value::Object(week)
}

fn coerce_list(
    name: &str,
    value: Option<&Value>,
    entry: fn(&Map<String, Value>) -> Value,
) -> Value {
    match value {
        Some(Value::Array(items)) => Value::Array(
            items
                .iter()
                .filter_map(Value::as_object)
                .map(entry)
                .collect(),
        ),
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(other) => {
            debug!(field = name, found = %other, "defaulting mistyped list field");
            Value::Array(Vec::new())
        }
    }
}

fn coerce_offering(obj: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    out.insert("name".into(), sub_text(Some(obj), "name"));
    out.insert("price".into(), sub_text(Some(obj), "price"));
    Value::Object(out)
}

fn coerce_image(obj: &Map<String, Value>) -> Value {
    let url = match obj.get("url") {
        Some(Value::String(u)) if is_web_url(u) => Value::String(u.clone()),
        _ => Value::Null,
    };
    let hashtags = match obj.get("hashtags") {
        Some(Value::Array(items)) => strings_only(items),
        _ => Vec::new(),
    };
    let mut out = Map::new();
    out.insert("name".into(), sub_text(Some(obj), "name"));
    out.insert("url".into(), url);
    out.insert(
        "hashtags".into(),
        Value::Array(hashtags.into_iter().map(Value::String).collect()),
    );
    Value::Object(out)
}

fn sub_text(obj: Option<&Map<String, Value>>, key: &str) -> Value {
    match obj.and_then(|o| o.get(key)) {
        Some(Value::String(s)) => Value::String(s.clone()),
        _ => Value::Null,
    }
}

fn strings_only(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn is_web_url(s: &str) -> bool {
    let s = s.trim();
    s.starts_with("http://") || s.starts_with("https://")
}
