pub mod clear;
pub mod logs;
pub mod viewer;

use axum::extract::{Query, rejection::QueryRejection};
use logs_viewer_core::LogsQuery;

/// Query parameters from the decoded pairs. An undecodable query string
/// counts as empty so every parameter takes its default.
fn query_or_default(pairs: Result<Query<Vec<(String, String)>>, QueryRejection>) -> LogsQuery {
    match pairs {
        Ok(Query(pairs)) => LogsQuery::from_pairs(pairs),
        Err(e) => {
            tracing::debug!("ignoring query string: {e}");
            LogsQuery::default()
        }
    }
}
