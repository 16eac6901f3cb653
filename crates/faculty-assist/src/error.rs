//! Error types for the assistant backend

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Assistant errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Uploaded file declared a media type outside the accepted set
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Uploaded file exceeded the size limit
    #[error("File exceeds the {limit} byte upload limit")]
    UploadTooLarge { limit: usize },

    /// Malformed multipart body or unreadable upload
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Request body could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A required request field was absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// File content could not be extracted
    #[error("Failed to extract '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Generative model call failed
    #[error("Model error: {0}")]
    Model(String),

    /// Website fetch failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a model error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error stems from bad client input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedMediaType(_)
                | Error::UploadTooLarge { .. }
                | Error::InvalidUpload(_)
                | Error::InvalidRequest(_)
                | Error::MissingField(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = match &self {
            Error::MissingField(field) => json!({
                "error": format!("Missing required field: {}", field),
            }),
            Error::InvalidRequest(_) => json!({
                "error": "Invalid request body",
                "details": self.to_string(),
            }),
            Error::UnsupportedMediaType(_)
            | Error::UploadTooLarge { .. }
            | Error::InvalidUpload(_) => json!({
                "error": "File upload rejected",
                "details": self.to_string(),
            }),
            _ => json!({
                "error": "Processing failed",
                "details": self.to_string(),
            }),
        };

        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(body)).into_response()
    }
}
