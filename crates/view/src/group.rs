//! Session/run grouping for the sidebar.

use logs_viewer_core::LogEntry;
use std::collections::HashMap;

/// Entries of one run within a session, most recent first.
#[derive(Debug, Clone)]
pub struct RunGroup<'a> {
    pub run_id: String,
    pub entries: Vec<&'a LogEntry>,
}

impl<'a> RunGroup<'a> {
    /// The entry that started the run (last in newest-first order).
    pub fn oldest(&self) -> Option<&'a LogEntry> {
        self.entries.last().copied()
    }
}

/// Entries sharing a session key, broken down by run.
#[derive(Debug, Clone)]
pub struct SessionGroup<'a> {
    pub session_key: String,
    pub entries: Vec<&'a LogEntry>,
    pub runs: Vec<RunGroup<'a>>,
}

impl<'a> SessionGroup<'a> {
    pub fn oldest(&self) -> Option<&'a LogEntry> {
        self.entries.last().copied()
    }

    pub fn display_name(&self) -> String {
        session_display_name(&self.session_key)
    }
}

/// Partition entries by session key, then by run key, keeping first-seen order.
pub fn group_by_session(entries: &[LogEntry]) -> Vec<SessionGroup<'_>> {
    let mut sessions: Vec<SessionGroup<'_>> = Vec::new();
    let mut session_slots: HashMap<String, usize> = HashMap::new();
    let mut run_slots: HashMap<(usize, String), usize> = HashMap::new();

    for entry in entries {
        let key = entry.session_key();
        let session_idx = *session_slots.entry(key.clone()).or_insert_with(|| {
            sessions.push(SessionGroup {
                session_key: key,
                entries: Vec::new(),
                runs: Vec::new(),
            });
            sessions.len() - 1
        });
        let session = &mut sessions[session_idx];
        session.entries.push(entry);

        let run_id = entry.run_key();
        let run_idx = *run_slots
            .entry((session_idx, run_id.clone()))
            .or_insert_with(|| {
                session.runs.push(RunGroup {
                    run_id,
                    entries: Vec::new(),
                });
                session.runs.len() - 1
            });
        session.runs[run_idx].entries.push(entry);
    }

    sessions
}

/// Human label for a session key.
///
/// `agent:main:user:5028574:1770190701878-j8ktqbgu8` becomes `User 5028574`.
pub fn session_display_name(session_key: &str) -> String {
    if session_key.is_empty() {
        return "Unknown".to_string();
    }
    let parts: Vec<&str> = session_key.split(':').collect();
    if parts.len() >= 4 && parts[2] == "user" {
        return format!("User {}", short_id(parts[3]));
    }
    if session_key.contains("agent:main:main") {
        return "Default Session".to_string();
    }
    session_key.chars().take(20).collect()
}

/// First eight characters of an identifier.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
