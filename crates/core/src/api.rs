//! Shared request/response types for the logs HTTP API.

use crate::entry::LogEntry;
use crate::paths::{LogFiles, LogKind};
use crate::reader::{parse_log_lines, read_last_lines};
use serde::{Deserialize, Serialize};

/// Window size used when `limit` is missing or not a number.
pub const DEFAULT_LIMIT: usize = 100;

/// Parse the `limit` query parameter, falling back to [`DEFAULT_LIMIT`].
///
/// Reads the leading digits after optional whitespace and `+`, so `10abc`
/// is 10. No leading digit (including a minus sign) means the default.
pub fn parse_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end]
        .parse::<usize>()
        .unwrap_or(DEFAULT_LIMIT)
}

/// Query parameters accepted by the logs and clear routes.
///
/// Both are kept as raw strings so an unparseable value falls back to its
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsQuery {
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    pub limit: Option<String>,
}

impl LogsQuery {
    /// Build from decoded query pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "type" => &mut query.log_type,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// GET /logs/api response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    /// Basename of the file read.
    pub file: String,
    /// Number of lines retrieved.
    pub total: usize,
    /// Most recent first.
    pub entries: Vec<LogEntry>,
}

/// Read and parse the trailing window of one log file.
pub fn load_logs(files: &LogFiles, kind: LogKind, limit: usize) -> LogsResponse {
    let lines = read_last_lines(&files.path(kind), limit);
    LogsResponse {
        file: kind.file_name().to_string(),
        total: lines.len(),
        entries: parse_log_lines(&lines),
    }
}

/// POST /logs/api/clear response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClearResponse {
    Cleared { success: bool, deleted: usize },
    Failed { success: bool, error: String },
}

impl ClearResponse {
    pub fn cleared(deleted: usize) -> Self {
        Self::Cleared {
            success: true,
            deleted,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Cleared { success: true, .. })
    }
}
