//! Log entry model.
//!
//! Every line of a log file becomes one [`LogEntry`]. Lines that parse as JSON
//! keep all of their fields; lines that do not are kept verbatim with a
//! parse-error marker so a single bad line never hides its neighbours.
//!
//! On the wire an entry is a flat JSON object:
//! ```json
//! {"index":0,"ts":"2026-02-04T10:00:00Z","sessionKey":"agent:main:main","stage":"request",...}
//! {"index":1,"raw":"not json","parseError":true}
//! ```

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fallback session/run key for entries that carry no identifier.
pub const UNKNOWN_KEY: &str = "unknown";

/// One line of a log file, parsed or not.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    /// The line was valid JSON. Non-object values are stored under `value`.
    Parsed {
        index: usize,
        fields: Map<String, Value>,
    },
    /// The line was not valid JSON.
    ParseError { index: usize, raw: String },
}

impl LogEntry {
    /// Parse a single log line, never failing.
    pub fn parse(index: usize, line: &str) -> Self {
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(fields)) => Self::Parsed { index, fields },
            Ok(other) => {
                let mut fields = Map::new();
                fields.insert("value".to_string(), other);
                Self::Parsed { index, fields }
            }
            Err(_) => Self::ParseError {
                index,
                raw: line.to_string(),
            },
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Parsed { index, .. } | Self::ParseError { index, .. } => *index,
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Raw field lookup. Parse-error entries have no fields.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Parsed { fields, .. } if key != "index" => fields.get(key),
            _ => None,
        }
    }

    /// Field rendered as text, treating null, `false` and `""` as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn ts(&self) -> Option<String> {
        self.text("ts")
    }

    pub fn run_id(&self) -> Option<String> {
        self.text("runId")
    }

    pub fn stage(&self) -> Option<String> {
        self.text("stage")
    }

    pub fn model_id(&self) -> Option<String> {
        self.text("modelId")
    }

    pub fn payload(&self) -> Option<&Value> {
        self.get("payload").filter(|v| !v.is_null())
    }

    pub fn usage(&self) -> Option<&Value> {
        self.get("usage").filter(|v| !v.is_null())
    }

    /// Session grouping key: `sessionKey`, then `sessionId`, then `"unknown"`.
    pub fn session_key(&self) -> String {
        self.text("sessionKey")
            .or_else(|| self.text("sessionId"))
            .unwrap_or_else(|| UNKNOWN_KEY.to_string())
    }

    /// Run grouping key: `runId`, then `"unknown"`.
    pub fn run_key(&self) -> String {
        self.run_id().unwrap_or_else(|| UNKNOWN_KEY.to_string())
    }

    /// Identity used to detect already-seen entries across refreshes.
    pub fn identity_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.ts().unwrap_or_default(),
            self.run_id().unwrap_or_default(),
            self.stage().unwrap_or_default()
        )
    }
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Parsed { index, fields } => {
                let extra = fields.keys().filter(|k| k.as_str() != "index").count();
                let mut map = serializer.serialize_map(Some(extra + 1))?;
                map.serialize_entry("index", index)?;
                for (key, value) in fields {
                    if key != "index" {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
            Self::ParseError { index, raw } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("index", index)?;
                map.serialize_entry("raw", raw)?;
                map.serialize_entry("parseError", &true)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for LogEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Object(map) = Value::deserialize(deserializer)? else {
            return Err(de::Error::custom("log entry must be a JSON object"));
        };

        let index = map
            .get("index")
            .and_then(Value::as_u64)
            .ok_or_else(|| de::Error::missing_field("index"))? as usize;

        if let Some(raw) = parse_error_raw(&map) {
            return Ok(Self::ParseError { index, raw });
        }

        let fields = map.into_iter().filter(|(k, _)| k != "index").collect();
        Ok(Self::Parsed { index, fields })
    }
}

/// The raw line of an object shaped exactly like a serialized parse error.
///
/// A logged line that is itself `{"raw":"..","parseError":true}` still reads
/// back as a parse error; the two are identical on the wire.
fn parse_error_raw(map: &Map<String, Value>) -> Option<String> {
    if map.get("parseError") != Some(&Value::Bool(true)) {
        return None;
    }
    let known = map
        .keys()
        .all(|k| matches!(k.as_str(), "index" | "raw" | "parseError"));
    match map.get("raw") {
        Some(Value::String(raw)) if known => Some(raw.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object_line() {
        let entry = LogEntry::parse(3, r#"{"ts":"t1","runId":"r1","stage":"request"}"#);
        assert_eq!(entry.index(), 3);
        assert!(!entry.is_parse_error());
        assert_eq!(entry.ts().as_deref(), Some("t1"));
        assert_eq!(entry.identity_key(), "t1-r1-request");
    }

    #[test]
    fn test_parse_error_keeps_raw_line() {
        let entry = LogEntry::parse(0, "{not json");
        assert_eq!(
            entry,
            LogEntry::ParseError {
                index: 0,
                raw: "{not json".to_string()
            }
        );
        let wire = serde_json::to_value(&entry).unwrap();
        assert_eq!(wire, json!({"index": 0, "raw": "{not json", "parseError": true}));
    }

    #[test]
    fn test_injected_index_wins_and_comes_first() {
        let entry = LogEntry::parse(7, r#"{"index":99,"stage":"usage"}"#);
        let wire = serde_json::to_string(&entry).unwrap();
        assert_eq!(wire, r#"{"index":7,"stage":"usage"}"#);
    }

    #[test]
    fn test_non_object_json_is_wrapped() {
        let entry = LogEntry::parse(1, "[1,2]");
        assert_eq!(entry.get("value"), Some(&json!([1, 2])));
        assert_eq!(entry.session_key(), UNKNOWN_KEY);
    }

    #[test]
    fn test_session_key_fallbacks() {
        let by_key = LogEntry::parse(0, r#"{"sessionKey":"a","sessionId":"b"}"#);
        let by_id = LogEntry::parse(0, r#"{"sessionKey":"","sessionId":"b"}"#);
        let none = LogEntry::parse(0, r#"{"runId":null}"#);
        assert_eq!(by_key.session_key(), "a");
        assert_eq!(by_id.session_key(), "b");
        assert_eq!(none.session_key(), UNKNOWN_KEY);
        assert_eq!(none.run_key(), UNKNOWN_KEY);
        assert_eq!(none.identity_key(), "--");
    }

    #[test]
    fn test_wire_shape_deserializes_back() {
        let parsed = LogEntry::parse(2, r#"{"ts":"t","payload":{"messages":[]}}"#);
        let failed = LogEntry::parse(3, "oops");
        for entry in [parsed, failed] {
            let wire = serde_json::to_string(&entry).unwrap();
            let back: LogEntry = serde_json::from_str(&wire).unwrap();
            assert_eq!(back, entry);
        }
    }

    #[test]
    fn test_logged_parse_error_field_reads_back_as_parsed() {
        let lines = [
            r#"{"parseError":true,"stage":"x"}"#,
            r#"{"parseError":true}"#,
            r#"{"parseError":true,"raw":42}"#,
            r#"{"parseError":true,"raw":"r","ts":"t"}"#,
        ];
        for line in lines {
            let entry = LogEntry::parse(5, line);
            let wire = serde_json::to_string(&entry).unwrap();
            let back: LogEntry = serde_json::from_str(&wire).unwrap();
            assert!(!back.is_parse_error(), "{line}");
            assert_eq!(back, entry);
        }
    }

    #[test]
    fn test_deserialize_rejects_missing_index() {
        let result = serde_json::from_str::<LogEntry>(r#"{"ts":"t"}"#);
        assert!(result.is_err());
    }
}
