//! HTTP error handling and response types.

use crate::error::TabcleanError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// No valid file in the upload
    EmptyBatch,
    NotFound(String),
    /// Malformed request or unsafe download reference
    BadRequest(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyBatch | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            Self::EmptyBatch => {
                ApiError::new("EMPTY_BATCH", TabcleanError::EmptyBatch.to_string())
            }
            Self::NotFound(msg) => ApiError::new("NOT_FOUND", msg),
            Self::BadRequest(msg) => ApiError::new("BAD_REQUEST", msg),
            Self::Internal(msg) => {
                tracing::error!("Request failed: {msg}");
                ApiError::new("INTERNAL_ERROR", msg)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<TabcleanError> for AppError {
    fn from(err: TabcleanError) -> Self {
        match err {
            TabcleanError::EmptyBatch => Self::EmptyBatch,
            TabcleanError::NotFound(name) => Self::NotFound(format!("File not found: {name}")),
            TabcleanError::InvalidPath(name) => {
                Self::BadRequest(format!("Invalid file name: {name}"))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::from(TabcleanError::EmptyBatch).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(TabcleanError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(TabcleanError::InvalidPath("..".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(TabcleanError::Parse("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
