//! Crate-wide error taxonomy and its single HTTP mapping.
//!
//! Handlers return `Result<_, Error>` instead of hand-building
//! `(StatusCode, Json<...>)` tuples in every match arm; the `IntoResponse`
//! impl below is the one place status codes and body shape are decided.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input (bad content block, missing field, unknown facet).
    /// Always raised locally, before anything touches a backend.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record for the given id/slug. Surfaced verbatim, never retried.
    #[error("not found")]
    NotFound,

    /// Missing or rejected bearer token on an administrative operation.
    #[error("invalid or expired token")]
    Unauthorized,

    /// Both the remote store and the local fallback failed. Terminal.
    #[error("storage failure: {0}")]
    Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            Error::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(detail),
            ),
            Error::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string(), None),
            Error::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
                None,
            ),
            Error::Storage(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Storage unavailable".to_string(),
                Some(detail),
            ),
        };

        if status.is_server_error() {
            tracing::error!(%status, %error, "request failed");
        }

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                Error::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (Error::NotFound, StatusCode::NOT_FOUND),
            (Error::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                Error::Storage("disk".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_not_found_body_omits_message() {
        let body = ErrorResponse {
            error: "Not found".into(),
            message: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Not found"}"#);
    }
}
