//! Client error types

use thiserror::Error;

/// Client error type
///
/// Server-side failures display only the server's message, so they can be
/// shown to the operator as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Server rejected the payload (400)
    #[error("{0}")]
    Validation(String),

    /// Any other non-2xx response
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Query rejected before any request was sent
    #[error(transparent)]
    Query(#[from] shared::QueryError),

    /// Client-side validation failed before any request was sent
    #[error("{}", .0.join("; "))]
    InvalidInput(Vec<String>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status, for errors that came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(400),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
