use reqwest::StatusCode;

use crate::models::application::ApplicationStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Server unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("You have already applied to this vacancy")]
    DuplicateApplication,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            Error::NetworkUnreachable(err.to_string())
        } else if err.is_decode() {
            Error::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Error::Http {
                status,
                message: err.to_string(),
            }
        } else {
            Error::NetworkUnreachable(err.to_string())
        }
    }
}
