//! Error handling module for Dog Finder.
//!
//! Two families live here: [`AppError`] for the consent server, mapped to HTTP
//! status codes and a JSON envelope, and [`ClientError`] for everything the
//! search client can run into while talking to remote services.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NO_LOCATION_MATCH: &str = "NO_LOCATION_MATCH";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const EMPTY_FAVORITES: &str = "EMPTY_FAVORITES";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Consent server error type.
#[derive(Debug)]
pub enum AppError {
    /// Bad request
    BadRequest(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<axum::http::header::InvalidHeaderValue> for AppError {
    fn from(err: axum::http::header::InvalidHeaderValue) -> Self {
        tracing::error!("Header error: {:?}", err);
        AppError::Internal(format!("Header error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::new(&self))).into_response()
    }
}

/// Errors surfaced by the search client.
///
/// None of these are fatal: every variant degrades the view to an empty or
/// unchanged state with [`ClientError::user_message`] shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Malformed input caught locally; nothing was sent.
    Validation(String),
    /// City/state lookup returned no zip codes.
    NoLocationMatch,
    /// Network failure or non-success status from a remote service.
    Transport(String),
    /// Match requested with no favorites selected; nothing was sent.
    EmptyFavorites,
    /// Reading or writing the local session file failed.
    Storage(String),
}

impl ClientError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::NoLocationMatch => codes::NO_LOCATION_MATCH,
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::EmptyFavorites => codes::EMPTY_FAVORITES,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
        }
    }

    /// Text shown to the user in place of results.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::NoLocationMatch => {
                "No locations found for the specified city or state.".to_string()
            }
            ClientError::Transport(_) => {
                "Failed to fetch dogs. Please check your filters and try again.".to_string()
            }
            ClientError::EmptyFavorites => {
                "Please add at least one favorite dog before finding a match.".to_string()
            }
            ClientError::Storage(_) => "Could not access local session storage.".to_string(),
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(detail) | ClientError::Storage(detail) => {
                write!(f, "{}: {}", self.error_code(), detail)
            }
            _ => write!(f, "{}: {}", self.error_code(), self.user_message()),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Transport error: {:?}", err);
        ClientError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Storage error: {:?}", err);
        ClientError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Session file error: {:?}", err);
        ClientError::Storage(format!("Invalid session file: {}", err))
    }
}

/// Invalid or unparsable configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", codes::CONFIG_ERROR, self.message, self.variable)
    }
}

impl std::error::Error for ConfigError {}
