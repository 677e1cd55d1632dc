//! Message-thread layout.
//!
//! Request payloads resend the whole conversation on every call, so only the
//! newest turn (the last `user` message onward) is shown by default and the
//! rest is folded into a collapsed history block.

use serde_json::Value;
use std::ops::Range;

/// How a message list is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadLayout {
    /// Short thread or no earlier context: everything rendered in place.
    /// Messages from `current_from` onward are still marked as current.
    Flat { current_from: Option<usize> },
    /// `0..current_from` is history, `current_from..` the current turn.
    Split { current_from: usize },
}

impl ThreadLayout {
    pub fn for_messages(messages: &[Value]) -> Self {
        let last_user = messages.iter().rposition(|m| message_role(m) == "user");
        match last_user {
            Some(idx) if messages.len() > 2 && idx > 0 => Self::Split { current_from: idx },
            other => Self::Flat {
                current_from: other,
            },
        }
    }

    /// Messages folded into the collapsed history block.
    pub fn history(&self) -> Range<usize> {
        match self {
            Self::Flat { .. } => 0..0,
            Self::Split { current_from } => 0..*current_from,
        }
    }

    /// Messages of the current turn for a list of `len` messages.
    pub fn current(&self, len: usize) -> Range<usize> {
        match self {
            Self::Flat {
                current_from: Some(start),
            }
            | Self::Split {
                current_from: start,
            } => *start..len,
            Self::Flat { current_from: None } => len..len,
        }
    }

    pub fn is_current(&self, idx: usize) -> bool {
        match self {
            Self::Flat { current_from } => current_from.is_some_and(|start| idx >= start),
            Self::Split { current_from } => idx >= *current_from,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Self::Split { .. })
    }
}

/// A message's role, `"unknown"` if absent.
pub fn message_role(message: &Value) -> &str {
    message
        .get("role")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
}
