//! Viewer state and the event reducer.
//!
//! All client state lives in one [`ViewState`] value. Every interaction is a
//! [`UiEvent`]; [`reduce`] consumes the state and returns the next one along
//! with what the presentation layer has to do about it.

use crate::group::{SessionGroup, group_by_session, session_display_name, short_id};
use logs_viewer_core::{DEFAULT_LIMIT, LogEntry, LogKind};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub log_kind: LogKind,
    pub limit: usize,
    /// Most recently fetched entries, newest first.
    pub entries: Vec<LogEntry>,
    /// Identity keys of expanded entry cards.
    pub expanded_entries: HashSet<String>,
    /// Identity keys of entries whose history context is unfolded.
    pub expanded_history: HashSet<String>,
    pub expanded_sessions: HashSet<String>,
    pub selected_session: Option<String>,
    /// Only meaningful together with `selected_session`.
    pub selected_run: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            log_kind: LogKind::default(),
            limit: DEFAULT_LIMIT,
            entries: Vec::new(),
            expanded_entries: HashSet::new(),
            expanded_history: HashSet::new(),
            expanded_sessions: HashSet::new(),
            selected_session: None,
            selected_run: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Replace the cache.
    Full,
    /// Prepend unseen entries only.
    Incremental,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SelectAll,
    SelectSession(String),
    SelectRun { session: String, run: String },
    ToggleEntry(String),
    ToggleHistory(String),
    ToggleSessionExpand(String),
    /// A fetch completed.
    Refresh {
        mode: RefreshMode,
        entries: Vec<LogEntry>,
    },
    /// The server confirmed the selected log was cleared.
    ClearLogs,
    SwitchLogType(LogKind),
    SetLimit(usize),
}

/// What the presentation layer must redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// Nothing changed on screen.
    None,
    /// Redraw from scratch; scroll positions reset.
    Full,
    /// Redraw but keep the sidebar where it was.
    KeepSidebarScroll,
    /// Redraw and restore every scroll position.
    PreserveScroll,
}

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Transition {
    pub state: ViewState,
    pub render: Render,
    /// A full refresh has to be fetched next.
    pub refetch: bool,
}

impl Transition {
    fn render(state: ViewState, render: Render) -> Self {
        Self {
            state,
            render,
            refetch: false,
        }
    }

    fn refetch(state: ViewState, render: Render) -> Self {
        Self {
            state,
            render,
            refetch: true,
        }
    }
}

pub fn reduce(mut state: ViewState, event: UiEvent) -> Transition {
    match event {
        UiEvent::SelectAll => {
            state.selected_session = None;
            state.selected_run = None;
            Transition::render(state, Render::KeepSidebarScroll)
        }
        UiEvent::SelectSession(session) => {
            state.selected_session = Some(session);
            state.selected_run = None;
            Transition::render(state, Render::KeepSidebarScroll)
        }
        UiEvent::SelectRun { session, run } => {
            state.selected_session = Some(session);
            state.selected_run = Some(run);
            Transition::render(state, Render::KeepSidebarScroll)
        }
        UiEvent::ToggleSessionExpand(session) => {
            if !state.expanded_sessions.remove(&session) {
                state.expanded_sessions.insert(session);
            }
            Transition::render(state, Render::KeepSidebarScroll)
        }
        UiEvent::ToggleEntry(key) => {
            if !state.expanded_entries.remove(&key) {
                state.expanded_entries.insert(key);
            }
            Transition::render(state, Render::PreserveScroll)
        }
        UiEvent::ToggleHistory(key) => {
            if !state.expanded_history.remove(&key) {
                state.expanded_history.insert(key);
            }
            Transition::render(state, Render::PreserveScroll)
        }
        UiEvent::Refresh {
            mode: RefreshMode::Incremental,
            entries,
        } if !state.entries.is_empty() => {
            let added = state.merge_incremental(entries);
            let render = if added > 0 {
                Render::PreserveScroll
            } else {
                Render::None
            };
            Transition::render(state, render)
        }
        UiEvent::Refresh { entries, .. } => {
            state.entries = entries;
            Transition::render(state, Render::Full)
        }
        UiEvent::ClearLogs => {
            state.entries.clear();
            state.expanded_entries.clear();
            state.expanded_history.clear();
            state.expanded_sessions.clear();
            state.selected_session = None;
            state.selected_run = None;
            Transition::refetch(state, Render::Full)
        }
        UiEvent::SwitchLogType(kind) => {
            state.log_kind = kind;
            state.expanded_entries.clear();
            state.expanded_history.clear();
            state.selected_session = None;
            state.selected_run = None;
            Transition::refetch(state, Render::None)
        }
        UiEvent::SetLimit(limit) => {
            state.limit = limit;
            Transition::refetch(state, Render::None)
        }
    }
}

impl ViewState {
    pub fn new(log_kind: LogKind, limit: usize) -> Self {
        Self {
            log_kind,
            limit,
            ..Self::default()
        }
    }

    /// Prepend entries not already cached and trim to the limit.
    /// Returns how many entries were new.
    pub fn merge_incremental(&mut self, fetched: Vec<LogEntry>) -> usize {
        let known: HashSet<String> = self.entries.iter().map(LogEntry::identity_key).collect();
        let mut merged: Vec<LogEntry> = fetched
            .into_iter()
            .filter(|entry| !known.contains(&entry.identity_key()))
            .collect();

        let added = merged.len();
        if added == 0 {
            return 0;
        }

        merged.append(&mut self.entries);
        merged.truncate(self.limit);
        self.entries = merged;
        added
    }

    pub fn sessions(&self) -> Vec<SessionGroup<'_>> {
        group_by_session(&self.entries)
    }

    /// Entries matching the current session/run selection.
    pub fn filtered_entries(&self) -> Vec<&LogEntry> {
        let Some(session) = &self.selected_session else {
            return self.entries.iter().collect();
        };
        self.entries
            .iter()
            .filter(|e| &e.session_key() == session)
            .filter(|e| match &self.selected_run {
                Some(run) => &e.run_key() == run,
                None => true,
            })
            .collect()
    }

    pub fn is_all_selected(&self) -> bool {
        self.selected_session.is_none() && self.selected_run.is_none()
    }

    pub fn is_entry_expanded(&self, entry: &LogEntry) -> bool {
        self.expanded_entries.contains(&entry.identity_key())
    }

    pub fn is_history_expanded(&self, entry: &LogEntry) -> bool {
        self.expanded_history.contains(&entry.identity_key())
    }

    pub fn is_session_expanded(&self, session_key: &str) -> bool {
        self.expanded_sessions.contains(session_key)
    }

    /// Summary line above the entry list.
    pub fn stats_line(&self) -> String {
        let mut line = format!("Showing: {} entries", self.filtered_entries().len());
        if let Some(session) = &self.selected_session {
            line.push_str(&format!(" | Session: {}", session_display_name(session)));
        }
        if let Some(run) = &self.selected_run {
            line.push_str(&format!(" | Run: {}", short_id(run)));
        }
        line
    }
}
