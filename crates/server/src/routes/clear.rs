use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::Method,
};
use logs_viewer_core::{ClearResponse, ClearTarget, LogFiles, clear_logs};

use crate::error::ClearFailure;

/// POST /logs/api/clear truncates the selected log file(s).
///
/// Registered for every method so that anything but POST gets a JSON 405
/// body instead of an empty one.
pub async fn clear(
    method: Method,
    State(files): State<LogFiles>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ClearResponse>, ClearFailure> {
    if method != Method::POST {
        return Err(ClearFailure::method_not_allowed());
    }

    let query = super::query_or_default(pairs);
    let target = ClearTarget::from_query(query.log_type.as_deref());
    let deleted = tokio::task::spawn_blocking(move || clear_logs(&files, target))
        .await
        .map_err(ClearFailure::from_task("clear logs task"))??;

    tracing::info!("cleared {deleted} log file(s) ({target:?})");
    Ok(Json(ClearResponse::cleared(deleted)))
}
