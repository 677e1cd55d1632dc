use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use logs_viewer_core::{LogFiles, LogKind, LogsResponse, load_logs, parse_limit};

/// GET /logs/api returns the trailing window of one log file, newest first.
///
/// Never fails: a missing file, bad lines, a bad `limit` or a repeated key
/// all degrade to what can be read. Repeated keys keep their first value.
pub async fn list_entries(
    State(files): State<LogFiles>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<LogsResponse> {
    let query = super::query_or_default(pairs);
    let kind = LogKind::from_query(query.log_type.as_deref());
    let limit = parse_limit(query.limit.as_deref());

    let response = tokio::task::spawn_blocking(move || load_logs(&files, kind, limit))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("reading {} log: {e}", kind);
            LogsResponse {
                file: kind.file_name().to_string(),
                total: 0,
                entries: Vec::new(),
            }
        });

    tracing::debug!("served {} {} entries", response.total, kind);
    Json(response)
}
