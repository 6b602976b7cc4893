//! Error types for the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Uploaded bytes are not a readable workbook, or a stored blob failed to decode
    #[error("Failed to parse '{filename}': {message}")]
    Parse { filename: String, message: String },

    /// File name rejected at the boundary
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    /// No stored file matches the requested name
    #[error("File not found: {0}")]
    NotFound(String),

    /// Persistence layer failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Operation exceeded its configured bound
    #[error("Operation '{operation}' timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    /// Credential check failed
    #[error("Invalid email or password")]
    Unauthorized,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a parse error
    pub fn parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            secs,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Internal causes keep their detail in the log only; callers get a
        // generic message plus a small enumerated error type.
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::Parse { filename, message } => (
                StatusCode::BAD_REQUEST,
                "parse_error",
                format!("Failed to parse '{}': {}", filename, message),
            ),
            Error::InvalidName(name) => (
                StatusCode::BAD_REQUEST,
                "invalid_name",
                format!("Invalid file name: {}", name),
            ),
            Error::NotFound(name) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("File not found: {}", name),
            ),
            Error::Timeout { operation, secs } => (
                StatusCode::GATEWAY_TIMEOUT,
                "timeout",
                format!("Operation '{}' timed out after {}s", operation, secs),
            ),
            Error::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Invalid email or password".to_string(),
            ),
            Error::Storage(detail) => {
                tracing::error!("Storage failure: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "Storage backend failure".to_string(),
                )
            }
            Error::Io(err) => {
                tracing::error!("IO failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "Internal IO failure".to_string(),
                )
            }
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_constructors_build_the_matching_variants() {
        assert!(matches!(Error::storage("disk full"), Error::Storage(_)));
        assert!(matches!(Error::internal("oops"), Error::Internal(_)));
        assert!(matches!(
            Error::timeout("ingest", 3),
            Error::Timeout { secs: 3, .. }
        ));
        assert!(matches!(Error::parse("a.xlsx", "bad"), Error::Parse { .. }));
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let response = Error::timeout("report", 5).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn storage_detail_is_not_echoed_to_the_caller() {
        let response = Error::storage("/var/db path leaked").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
