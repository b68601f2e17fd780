//! Error types for the backend client.

use thiserror::Error;

/// Errors produced by the RAG backend client.
///
/// Non-2xx statuses and transport-level failures are both terminal for
/// the exchange: the client never retries.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend answered with a non-success HTTP status.
    #[error("backend returned {status} {status_text}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical status text.
        status_text: String,
    },

    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL is not a valid URL.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl BackendError {
    /// HTTP status code, when the backend rejected the request.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
