//! Error types for carbon-daemon

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use carbon_core::{ActivityError, PredictorError};

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// API-level errors, rendered as a uniform `{"error": message}` JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or non-numeric request input, or an unknown activity type
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected failure inside the service
    #[error("{0}")]
    Internal(String),
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PredictorError> for ApiError {
    fn from(err: PredictorError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;
