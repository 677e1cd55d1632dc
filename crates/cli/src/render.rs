//! Plain-text rendering of the viewer model for the terminal subcommands.

use logs_viewer_core::LogEntry;
use logs_viewer_view::text::{
    format_time, format_timestamp, message_content, pretty_json, system_text, tool_names,
};
use logs_viewer_view::{SessionGroup, ThreadLayout, message_role, short_id};
use serde_json::Value;
use std::fmt::Write as _;

/// Session/run tree: one line per session, one indented line per run.
pub fn render_sessions(sessions: &[SessionGroup<'_>]) -> String {
    let mut out = String::new();
    for session in sessions {
        let oldest_ts = session.oldest().and_then(LogEntry::ts);
        let _ = writeln!(
            out,
            "{}  {}  ({})",
            session.display_name(),
            format_timestamp(oldest_ts.as_deref()),
            session.entries.len()
        );
        for run in &session.runs {
            let run_ts = run.oldest().and_then(LogEntry::ts);
            let _ = writeln!(
                out,
                "  Run {}  {}  ({})",
                short_id(&run.run_id),
                format_time(run_ts.as_deref()),
                run.entries.len()
            );
        }
    }
    out
}

/// One entry card: header line, then the payload sections.
pub fn render_entry(entry: &LogEntry, show_history: bool) -> String {
    let mut out = String::new();
    if let LogEntry::ParseError { raw, .. } = entry {
        let _ = writeln!(out, "[error] #{}", entry.index());
        out.push_str(&indent(raw, "  "));
        return out;
    }

    let _ = writeln!(
        out,
        "[{}] {} | Run: {} | Model: {}",
        entry.stage().unwrap_or_else(|| "unknown".to_string()),
        format_timestamp(entry.ts().as_deref()),
        short_id(&entry.run_id().unwrap_or_else(|| "-".to_string())),
        entry.model_id().unwrap_or_else(|| "-".to_string()),
    );

    let Some(payload) = entry.payload().filter(|p| p.is_object()) else {
        out.push_str(&indent(&entry_json(entry), "  "));
        return out;
    };

    if let Some(system) = payload.get("system").filter(|s| !is_falsy(s)) {
        let text = system_text(system);
        let _ = writeln!(out, "  System Prompt ({} chars)", text.chars().count());
    }
    if let Some(Value::Array(messages)) = payload.get("messages") {
        let _ = writeln!(out, "  Messages ({})", messages.len());
        out.push_str(&render_messages(messages, show_history));
    }
    if let Some(tools) = payload.get("tools").filter(|t| t.is_array()) {
        let names = tool_names(tools);
        let _ = writeln!(out, "  Tools ({}): {}", names.len(), names.join(", "));
    }
    if let Some(usage) = entry.usage() {
        out.push_str("  Usage\n");
        out.push_str(&indent(&pretty_json(usage), "    "));
    }
    out
}

fn render_messages(messages: &[Value], show_history: bool) -> String {
    let layout = ThreadLayout::for_messages(messages);
    let mut out = String::new();

    if layout.is_split() {
        let history = layout.history();
        let _ = writeln!(out, "    History Context ({} messages)", history.len());
        if show_history {
            for idx in history {
                out.push_str(&render_message(&messages[idx], idx, "      ", false));
            }
        }
        out.push_str("    Current Turn\n");
    }

    let start = if layout.is_split() {
        layout.history().end
    } else {
        0
    };
    for (idx, message) in messages.iter().enumerate().skip(start) {
        out.push_str(&render_message(message, idx, "    ", layout.is_current(idx)));
    }
    out
}

fn render_message(message: &Value, idx: usize, pad: &str, current: bool) -> String {
    let marker = if current { " [NEW]" } else { "" };
    let mut out = format!(
        "{pad}{} #{}{marker}\n",
        message_role(message).to_uppercase(),
        idx + 1
    );
    out.push_str(&indent(&message_content(message), &format!("{pad}  ")));
    out
}

fn entry_json(entry: &LogEntry) -> String {
    serde_json::to_value(entry)
        .map(|v| pretty_json(&v))
        .unwrap_or_default()
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn indent(text: &str, pad: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let _ = writeln!(out, "{pad}{line}");
    }
    out
}
