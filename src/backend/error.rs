//! Backend error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend collaborators.
///
/// All backend errors are recoverable from the timer's point of view:
/// callers log them and the countdown continues.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connection, timeout, body read)
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned http {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// The configured API base URL is unusable
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),
}
