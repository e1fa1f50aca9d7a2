use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Explorer error types
///
/// Every failure of a lookup is classified into one of these kinds and
/// surfaced to the caller with a human-readable message. None of them are
/// retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// Bad input shape; no remote call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote call could not complete (connection, HTTP status, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered but signaled an application error
    #[error("Remote error: {0}")]
    Remote(String),

    /// The endpoint answered successfully but the entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ExplorerError {
    /// The message carried by the error, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ExplorerError::Validation(msg)
            | ExplorerError::Transport(msg)
            | ExplorerError::Remote(msg)
            | ExplorerError::NotFound(msg) => msg,
        }
    }

    /// Machine-readable error code used in API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ExplorerError::Validation(_) => "VALIDATION_ERROR",
            ExplorerError::Transport(_) => "TRANSPORT_ERROR",
            ExplorerError::Remote(_) => "REMOTE_ERROR",
            ExplorerError::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// Structured error response for the API
#[derive(Serialize)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,

    /// Machine-readable error code
    error_code: String,

    /// Optional detailed error information
    details: Option<String>,
}

impl ResponseError for ExplorerError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
            details: Some(self.message().to_string()),
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ExplorerError::Validation(_) => StatusCode::BAD_REQUEST,
            ExplorerError::Transport(_) => StatusCode::SERVICE_UNAVAILABLE,
            ExplorerError::Remote(_) => StatusCode::BAD_GATEWAY,
            ExplorerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}
