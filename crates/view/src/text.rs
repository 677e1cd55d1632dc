//! Display text helpers: escape normalization, truncation, payload parts.

use chrono::{DateTime, Local};
use serde_json::Value;

/// Display limit for message bodies, in characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

pub const TRUNCATION_MARKER: &str = "\n\n... [truncated]";

/// Turn literal `\n`, `\t` and `\r` sequences into control characters.
///
/// The producer sometimes double-escapes strings, leaving the two-character
/// sequence in the stored JSON.
pub fn unescape_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let replacement = match chars.peek() {
                Some('n') => Some('\n'),
                Some('t') => Some('\t'),
                Some('r') => Some('\r'),
                _ => None,
            };
            if let Some(r) = replacement {
                chars.next();
                out.push(r);
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Cut text to [`MAX_CONTENT_CHARS`] and mark the cut.
pub fn truncate_for_display(text: String) -> String {
    match text.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((cut, _)) => {
            let mut cut_text = text[..cut].to_string();
            cut_text.push_str(TRUNCATION_MARKER);
            cut_text
        }
        None => text,
    }
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Render a message's `content`, either a string or a list of typed parts.
pub fn message_content(message: &Value) -> String {
    match message.get("content") {
        Some(Value::String(s)) => truncate_for_display(unescape_literals(s)),
        Some(Value::Array(parts)) => {
            let joined = parts.iter().map(content_part).collect::<Vec<_>>().join("\n\n");
            truncate_for_display(joined)
        }
        _ => String::new(),
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn content_part(part: &Value) -> String {
    match str_field(part, "type") {
        "text" => unescape_literals(str_field(part, "text")),
        "thinking" => format!("[Thinking]\n{}", unescape_literals(str_field(part, "thinking"))),
        "tool_use" => format!("[Tool Call: {}]", str_field(part, "name")),
        "tool_result" => match part.get("content") {
            Some(Value::String(s)) => format!("[Tool Result]\n{}", unescape_literals(s)),
            _ => "[Tool Result]".to_string(),
        },
        _ => pretty_json(part),
    }
}

/// Render a system prompt given as a string or a list of text blocks.
pub fn system_text(system: &Value) -> String {
    match system {
        Value::String(s) => unescape_literals(s),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => unescape_literals(s),
                _ if item.get("type").and_then(Value::as_str) == Some("text") => {
                    match item.get("text").and_then(Value::as_str) {
                        Some(text) if !text.is_empty() => unescape_literals(text),
                        _ => pretty_json(item),
                    }
                }
                _ => pretty_json(item),
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        _ => pretty_json(system),
    }
}

pub fn tool_names(tools: &Value) -> Vec<String> {
    tools
        .as_array()
        .map(|tools| {
            tools
                .iter()
                .map(|t| {
                    t.get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("?")
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Local));
    }
    let millis = ts.parse::<i64>().ok()?;
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&Local))
}

/// Local date and time, or the raw value if it is not a timestamp.
pub fn format_timestamp(ts: Option<&str>) -> String {
    match ts {
        None => "-".to_string(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// Local time of day, or the raw value if it is not a timestamp.
pub fn format_time(ts: Option<&str>) -> String {
    match ts {
        None => "-".to_string(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}
