use reqwest::StatusCode;
use std::fmt;

use crate::storage::StorageError;

#[derive(Debug)]
pub enum AppError {
    // Authentication errors
    Unauthorized(String),
    Forbidden(String),

    // Validation errors (never reach the network)
    ValidationError(String),

    // Backend rejections
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    ServerError { status: u16, message: String },
    Api { status: u16, message: String },

    // Transport errors
    Network(String),
    Decode(String),

    // Credential storage errors
    Storage(String),

    // Internal errors
    InternalError(String),
}

impl AppError {
    /// Map a failed backend response onto the error taxonomy.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => AppError::BadRequest(message),
            401 => AppError::Unauthorized(message),
            403 => AppError::Forbidden(message),
            404 => AppError::NotFound(message),
            409 => AppError::Conflict(message),
            code if code >= 500 => AppError::ServerError {
                status: code,
                message,
            },
            code => AppError::Api {
                status: code,
                message,
            },
        }
    }

    /// HTTP status carried by the error, when it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized(_) => Some(401),
            AppError::Forbidden(_) => Some(403),
            AppError::BadRequest(_) => Some(400),
            AppError::NotFound(_) => Some(404),
            AppError::Conflict(_) => Some(409),
            AppError::ServerError { status, .. } | AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The message a view shows to the user.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::ValidationError(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Network(msg)
            | AppError::Decode(msg)
            | AppError::Storage(msg)
            | AppError::InternalError(msg) => msg,
            AppError::ServerError { message, .. } | AppError::Api { message, .. } => message,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::ValidationError(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            AppError::Api { status, message } => write!(f, "Request failed ({}): {}", status, message),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            AppError::Storage(msg) => write!(f, "Credential storage error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP request error: {:?}", err);
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Credential storage error: {:?}", err);
        AppError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Anyhow error: {:?}", err);
        AppError::InternalError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
