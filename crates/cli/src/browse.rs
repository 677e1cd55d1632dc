use anyhow::Result;
use logs_viewer_core::{LogFiles, LogKind, load_logs};
use logs_viewer_view::{RefreshMode, UiEvent, ViewState, reduce};

use crate::render::{render_entry, render_sessions};

/// What `show` narrows the window to.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub session: Option<String>,
    pub run: Option<String>,
}

/// Fetch a window and apply a selection, the way the viewer page does.
pub fn load_view(files: &LogFiles, kind: LogKind, limit: usize, selection: Selection) -> ViewState {
    let response = load_logs(files, kind, limit);
    let mut state = reduce(
        ViewState::new(kind, limit),
        UiEvent::Refresh {
            mode: RefreshMode::Full,
            entries: response.entries,
        },
    )
    .state;

    let event = match selection {
        Selection {
            session: Some(session),
            run: Some(run),
        } => Some(UiEvent::SelectRun { session, run }),
        Selection {
            session: Some(session),
            run: None,
        } => Some(UiEvent::SelectSession(session)),
        _ => None,
    };
    if let Some(event) = event {
        state = reduce(state, event).state;
    }
    state
}

pub fn run_sessions(files: &LogFiles, kind: LogKind, limit: usize) -> Result<()> {
    let state = load_view(files, kind, limit, Selection::default());
    if state.entries.is_empty() {
        println!("No {} entries in {}", kind.display(), files.path(kind).display());
        return Ok(());
    }

    print!("{}", render_sessions(&state.sessions()));
    println!();
    println!("Total: {} session(s), {} entries", state.sessions().len(), state.entries.len());
    Ok(())
}

pub fn run_show(
    files: &LogFiles,
    kind: LogKind,
    limit: usize,
    selection: Selection,
    show_history: bool,
) -> Result<()> {
    let state = load_view(files, kind, limit, selection);
    println!("{}", state.stats_line());
    println!();

    let entries = state.filtered_entries();
    if entries.is_empty() {
        println!("No log entries.");
        return Ok(());
    }
    for entry in entries {
        println!("{}", render_entry(entry, show_history));
    }
    Ok(())
}
