use anyhow::{Context, Result};
use logs_viewer_core::{LogEntry, LogFiles, LogKind, LogsResponse, load_logs};
use logs_viewer_view::{RefreshMode, Render, UiEvent, ViewState, reduce};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

use crate::render::render_entry;

/// Where `watch` reads its window from.
pub enum Source {
    /// The log directory on this machine.
    Disk(LogFiles),
    /// A running viewer, through its `/logs/api` route.
    Remote {
        client: reqwest::Client,
        base_url: String,
    },
}

impl Source {
    pub fn remote(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::Remote {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch(&self, kind: LogKind, limit: usize) -> Result<Vec<LogEntry>> {
        match self {
            Self::Disk(files) => {
                let files = files.clone();
                let response = tokio::task::spawn_blocking(move || load_logs(&files, kind, limit))
                    .await
                    .context("Log reader task failed")?;
                Ok(response.entries)
            }
            Self::Remote { client, base_url } => {
                let url = format!("{base_url}/logs/api");
                let response: LogsResponse = client
                    .get(&url)
                    .query(&[("type", kind.as_str().to_string()), ("limit", limit.to_string())])
                    .send()
                    .await
                    .with_context(|| format!("Failed to reach {url}"))?
                    .error_for_status()
                    .with_context(|| format!("Bad response from {url}"))?
                    .json()
                    .await
                    .with_context(|| format!("Invalid response body from {url}"))?;
                Ok(response.entries)
            }
        }
    }
}

/// Merge one fetch into the cache. Returns the next state and the entries
/// that were not cached before, oldest first.
pub fn apply_tick(state: ViewState, fetched: Vec<LogEntry>) -> (ViewState, Vec<LogEntry>) {
    let seen: HashSet<String> = state.entries.iter().map(LogEntry::identity_key).collect();
    let transition = reduce(
        state,
        UiEvent::Refresh {
            mode: RefreshMode::Incremental,
            entries: fetched,
        },
    );
    if transition.render == Render::None {
        return (transition.state, Vec::new());
    }

    let fresh: Vec<LogEntry> = transition
        .state
        .entries
        .iter()
        .filter(|e| !seen.contains(&e.identity_key()))
        .rev()
        .cloned()
        .collect();
    (transition.state, fresh)
}

/// Poll the source and print new entries until Ctrl-C.
pub async fn run_watch(source: Source, kind: LogKind, limit: usize, interval_secs: u64) -> Result<()> {
    let mut state = ViewState::new(kind, limit);
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    println!("Watching {} logs (Ctrl-C to stop)", kind.display());
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match source.fetch(kind, limit).await {
                    Ok(fetched) => {
                        let (next, fresh) = apply_tick(state, fetched);
                        state = next;
                        debug!("watch tick: {} new entries", fresh.len());
                        for entry in &fresh {
                            println!("{}", render_entry(entry, false));
                        }
                    }
                    Err(e) => warn!("watch: fetch failed: {e:#}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("watch shutting down");
                break;
            }
        }
    }
    Ok(())
}
