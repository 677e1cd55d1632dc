use crate::paths::{ClearTarget, LogFiles};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClearError {
    #[error("failed to truncate {}: {source}", path.display())]
    Truncate {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Truncate the selected log files in place.
///
/// Files are emptied, not removed, so the producer keeps appending to the
/// same path. Missing files are skipped. Returns how many files were
/// truncated.
pub fn clear_logs(files: &LogFiles, target: ClearTarget) -> Result<usize, ClearError> {
    let mut deleted = 0;
    for kind in target.kinds() {
        let path = files.path(*kind);
        if !path.exists() {
            continue;
        }
        std::fs::write(&path, "").map_err(|source| ClearError::Truncate {
            path: path.clone(),
            source,
        })?;
        tracing::info!("truncated {}", path.display());
        deleted += 1;
    }
    Ok(deleted)
}
