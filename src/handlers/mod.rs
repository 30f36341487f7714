//! HTTP handlers for the document-release workflow.
//!
//! Thin routing layer over the lifecycle machine and the sync engine.
//! Handlers validate caller input, invoke the core, and map the error
//! taxonomy onto HTTP responses.

pub mod requests;
pub mod sync;

use crate::error::DocgateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body returned by every successful lifecycle endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Always "accepted".
    pub status: &'static str,
}

impl StatusResponse {
    /// The 202-equivalent success body.
    #[must_use]
    pub const fn accepted() -> Self {
        Self { status: "accepted" }
    }
}

/// Error body returned to callers.
#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// HTTP-facing wrapper for [`DocgateError`].
///
/// Maps the taxonomy onto status codes: caller errors to 4xx, everything
/// server-side to a generic 500 whose detail has already been logged by
/// the core.
#[derive(Debug)]
pub struct ApiError(pub DocgateError);

impl From<DocgateError> for ApiError {
    fn from(err: DocgateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            DocgateError::Validation { .. } | DocgateError::UnsupportedDocument { .. } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
            DocgateError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            DocgateError::InvalidTransition { .. } => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            DocgateError::TooManyRequests { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, "TOO_MANY_REQUESTS")
            }
            DocgateError::DocumentUnavailable { .. }
            | DocgateError::InconsistentState { .. }
            | DocgateError::PostSendPersistFailure { .. }
            | DocgateError::Database(_)
            | DocgateError::ObjectStore(_)
            | DocgateError::Email(_)
            | DocgateError::Notification(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = if status.is_server_error() {
            // Server-side detail stays in the logs.
            "something went wrong".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                code,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_map_to_4xx() {
        let resp = ApiError(DocgateError::NotFound { id: "x".into() }).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiError(DocgateError::InvalidTransition {
            id: "x".into(),
            current: "REJECTED".into(),
            attempted: "accept".into(),
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn server_errors_map_to_500() {
        for err in [
            DocgateError::DocumentUnavailable { key: "k".into() },
            DocgateError::InconsistentState { detail: "d".into() },
            DocgateError::PostSendPersistFailure { id: "x".into() },
        ] {
            let resp = ApiError(err).into_response();
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
