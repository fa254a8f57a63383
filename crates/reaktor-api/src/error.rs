//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`IssueError`] from reaktor-core to HTTP status codes and returns
//! JSON error bodies with a machine-readable code and a fixed message.
//! Storage failure details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reaktor_core::IssueError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "ALREADY_EXISTS").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Submitted issue fields are not a legal issue (422).
    #[error("{0}")]
    InvalidInput(String),

    /// The issue duplicates a stored one (401, as the create contract requires).
    #[error("{0}")]
    AlreadyExists(String),

    /// No issue under the requested identity (404).
    #[error("{0}")]
    NotFound(String),

    /// A filter matched nothing (404).
    #[error("{0}")]
    EmptyResult(String),

    /// Status label not recognised (422).
    #[error("{0}")]
    TransitionRejected(String),

    /// Request body or header could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure: missing or invalid token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INPUT"),
            Self::AlreadyExists(_) => (StatusCode::UNAUTHORIZED, "ALREADY_EXISTS"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::EmptyResult(_) => (StatusCode::NOT_FOUND, "EMPTY_RESULT"),
            Self::TransitionRejected(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "TRANSITION_REJECTED")
            }
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        } else {
            tracing::warn!(code, %message, "request rejected");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert issue operation failures to API errors.
impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        let message = err.to_string();
        match err {
            IssueError::InvalidInput(rule) => {
                tracing::debug!(rule = %rule, "issue failed validation");
                Self::InvalidInput(message)
            }
            IssueError::AlreadyExists => Self::AlreadyExists(message),
            IssueError::NotFound => Self::NotFound(message),
            IssueError::EmptyResult => Self::EmptyResult(message),
            IssueError::TransitionRejected(_) => Self::TransitionRejected(message),
            IssueError::Storage(_) => Self::Internal(message),
        }
    }
}
