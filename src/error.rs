//! Error types for Servers.com API operations.

use thiserror::Error;

use crate::link::Relation;

/// Errors raised by a [`Transport`](crate::Transport) when a request could
/// not be completed at all.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other transport failure.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Category of a non-2xx API response, derived from its status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    InternalServerError,
    /// Any status without a dedicated kind.
    Unexpected,
}

impl ApiErrorKind {
    /// Map an HTTP status code to its error kind.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::UnprocessableEntity,
            500 => Self::InternalServerError,
            _ => Self::Unexpected,
        }
    }
}

/// Errors that can occur during Servers.com API operations.
#[derive(Debug, Error)]
pub enum ServersComError {
    /// Configuration is missing or incomplete.
    #[error("Servers.com configuration required: {0}")]
    ConfigMissing(String),

    /// The API answered with a non-2xx status.
    #[error("Servers.com API error ({status_code} {code}): {message}")]
    Api {
        kind: ApiErrorKind,
        status_code: u16,
        code: String,
        message: String,
        /// Field-level validation errors (422 responses).
        errors: Option<serde_json::Value>,
    },

    /// The request could not be completed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Building the HTTP client failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON decoding error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// A directional page was requested but the current page has no such link.
    #[error("No rel for: {relation}")]
    Navigation { relation: Relation },

    /// `collect` gave up while the server still advertised a next page.
    #[error("Stopped after {limit} pages with more pages remaining")]
    PageLimit { limit: usize },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl ServersComError {
    /// HTTP status of the failed response, if the server answered at all.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Kind of API error, if this is one.
    #[must_use]
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type alias for Servers.com operations.
pub type Result<T> = core::result::Result<T, ServersComError>;
