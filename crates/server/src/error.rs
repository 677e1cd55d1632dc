use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use logs_viewer_core::{ClearError, ClearResponse};
use std::fmt;

/// Failure of the clear route.
///
/// Always rendered as `{"success": false, "error": "<message>"}` so the
/// caller can tell whether anything was truncated. Only a wrong method maps
/// to a non-200 status.
#[derive(Debug)]
pub struct ClearFailure {
    status: StatusCode,
    message: String,
}

impl ClearFailure {
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "Method not allowed".to_string(),
        }
    }

    /// Log a failed truncation and report it in the body.
    pub fn truncate(err: ClearError) -> Self {
        tracing::error!("clear logs: {err}");
        Self {
            status: StatusCode::OK,
            message: err.to_string(),
        }
    }

    /// Build a closure that logs a background task error and reports it.
    pub fn from_task<E: fmt::Display>(context: &str) -> impl FnOnce(E) -> Self + '_ {
        move |e| {
            tracing::error!("{context}: {e}");
            Self {
                status: StatusCode::OK,
                message: e.to_string(),
            }
        }
    }
}

impl From<ClearError> for ClearFailure {
    fn from(err: ClearError) -> Self {
        Self::truncate(err)
    }
}

impl IntoResponse for ClearFailure {
    fn into_response(self) -> Response {
        (self.status, Json(ClearResponse::failed(self.message))).into_response()
    }
}
