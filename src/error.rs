//! Error types and handling for the `VoiceGuide` backend

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the `VoiceGuide` backend
#[derive(Error, Debug)]
pub enum VoiceGuideError {
    /// Missing or invalid configuration, fatal at startup
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The completion service failed, timed out or answered with garbage
    #[error("Upstream service error: {message}")]
    Upstream { message: String },

    /// A requested gazetteer entry does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl VoiceGuideError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream service error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status used when this error reaches a handler
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            VoiceGuideError::Config { .. } | VoiceGuideError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            VoiceGuideError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            VoiceGuideError::NotFound { .. } => StatusCode::NOT_FOUND,
            VoiceGuideError::Validation { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            VoiceGuideError::Config { .. } => {
                "The assistant is not configured correctly. Please contact the operator.".to_string()
            }
            VoiceGuideError::Upstream { message } => {
                format!("Error processing query: {message}")
            }
            VoiceGuideError::NotFound { message } => message.clone(),
            VoiceGuideError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            VoiceGuideError::Io { .. } => "Internal file operation failed.".to_string(),
        }
    }
}

impl IntoResponse for VoiceGuideError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (status, Json(json!({ "detail": self.user_message() }))).into_response()
    }
}
