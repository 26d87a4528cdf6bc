//! Error types and HTTP error response handling.
//!
//! This module defines the errors of both handlers and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.
//!
//! The two handlers deliberately report failures differently:
//! - movements separate store failures from every other failure, and answer
//!   with `{"message", "error"}` bodies
//! - locations collapse all failures into one `{"error"}` body

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failure raised by a storage backend (connectivity, permissions, throttling).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors of the movement handler.
#[derive(Debug, thiserror::Error)]
pub enum MovementError {
    /// The store call failed.
    ///
    /// Returns HTTP 500 with "error accessing store".
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Anything else that went wrong, e.g. a body that is not valid JSON.
    ///
    /// Returns HTTP 500 with "error updating movement".
    #[error("{0}")]
    Unexpected(String),

    /// PUT body carried nothing to write.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("no data to update")]
    NothingToUpdate,

    /// Returns HTTP 405 Method Not Allowed.
    #[error("method not supported")]
    MethodNotSupported,
}

impl From<serde_json::Error> for MovementError {
    fn from(err: serde_json::Error) -> Self {
        MovementError::Unexpected(err.to_string())
    }
}

/// Convert MovementError into an HTTP response.
///
/// # Response Format
///
/// - `NothingToUpdate` → 400 `{"message": "no data to update"}`
/// - `MethodNotSupported` → 405 `{"message": "method not supported"}`
/// - `Store` → 500 `{"message": "error accessing store", "error": "<details>"}`
/// - `Unexpected` → 500 `{"message": "error updating movement", "error": "<details>"}`
impl IntoResponse for MovementError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            MovementError::NothingToUpdate => (
                StatusCode::BAD_REQUEST,
                json!({ "message": self.to_string() }),
            ),
            MovementError::MethodNotSupported => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "message": self.to_string() }),
            ),
            MovementError::Store(ref err) => {
                tracing::error!(error = %err, "movement store call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "error accessing store", "error": err.to_string() }),
                )
            }
            MovementError::Unexpected(ref details) => {
                tracing::error!(error = %details, "movement request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "error updating movement", "error": details }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Errors of the location handler.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("method not allowed")]
    MethodNotAllowed,
}

/// Convert LocationError into an HTTP response.
///
/// Every variant is reported as `{"error": "<message>"}`; only the status differs.
impl IntoResponse for LocationError {
    fn into_response(self) -> Response {
        let status = match self {
            LocationError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            LocationError::Store(_) | LocationError::InvalidBody(_) => {
                tracing::error!(error = %self, "location request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
