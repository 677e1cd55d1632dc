//! Log file locations.
//!
//! The producer writes two JSONL files under `~/.openclaw/logs`. Their names
//! are fixed; only the directory is injectable so tests can point at a
//! temporary directory.

use std::fmt;
use std::path::{Path, PathBuf};

pub const PAYLOAD_LOG_FILE: &str = "anthropic-payload.jsonl";
pub const RAW_STREAM_LOG_FILE: &str = "raw-stream.jsonl";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PathError {
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Which log file a request is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum LogKind {
    /// Request payloads sent to the model (primary file).
    #[default]
    Payload,
    /// Raw streaming events.
    Raw,
}

impl LogKind {
    /// Query-string selector. Anything but `raw` selects the payload log.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("raw") => Self::Raw,
            _ => Self::Payload,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payload => "payload",
            Self::Raw => "raw",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Self::Payload => "Anthropic Payload",
            Self::Raw => "Raw Stream",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Payload => PAYLOAD_LOG_FILE,
            Self::Raw => RAW_STREAM_LOG_FILE,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which log files a clear request truncates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearTarget {
    #[default]
    Payload,
    Raw,
    /// Both files. Only reachable through a direct API call.
    All,
}

impl ClearTarget {
    /// Query-string selector. Unrecognized values select the payload log.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("raw") => Self::Raw,
            Some("all") => Self::All,
            _ => Self::Payload,
        }
    }

    pub fn kinds(self) -> &'static [LogKind] {
        match self {
            Self::Payload => &[LogKind::Payload],
            Self::Raw => &[LogKind::Raw],
            Self::All => &[LogKind::Payload, LogKind::Raw],
        }
    }
}

/// The directory holding both log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFiles {
    dir: PathBuf,
}

impl LogFiles {
    /// `~/.openclaw/logs`
    pub fn default_location() -> Result<Self, PathError> {
        let base = directories::BaseDirs::new().ok_or(PathError::NoHomeDir)?;
        Ok(Self::in_dir(base.home_dir().join(".openclaw").join("logs")))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, kind: LogKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_kind_defaults_to_payload() {
        assert_eq!(LogKind::from_query(Some("raw")), LogKind::Raw);
        assert_eq!(LogKind::from_query(Some("payload")), LogKind::Payload);
        assert_eq!(LogKind::from_query(Some("RAW")), LogKind::Payload);
        assert_eq!(LogKind::from_query(None), LogKind::Payload);
    }

    #[test]
    fn test_clear_target_selectors() {
        assert_eq!(ClearTarget::from_query(Some("all")).kinds().len(), 2);
        assert_eq!(ClearTarget::from_query(Some("raw")).kinds(), &[LogKind::Raw]);
        assert_eq!(
            ClearTarget::from_query(Some("bogus")).kinds(),
            &[LogKind::Payload]
        );
    }

    #[test]
    fn test_paths_use_fixed_file_names() {
        let files = LogFiles::in_dir("/tmp/logs");
        assert_eq!(
            files.path(LogKind::Payload),
            PathBuf::from("/tmp/logs/anthropic-payload.jsonl")
        );
        assert_eq!(
            files.path(LogKind::Raw),
            PathBuf::from("/tmp/logs/raw-stream.jsonl")
        );
    }
}
