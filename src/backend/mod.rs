//! Backend collaborators for the focus timer.
//!
//! The daemon reports work segments to two HTTP collaborators it does not
//! own: a session recorder (create/complete focus-session records) and a
//! stats endpoint (per-profile counters). Both are best-effort: failures
//! are logged by the caller and never block timer progression.

mod error;
mod recorder;
mod stats;

pub use error::BackendError;
pub use recorder::{
    HttpSessionRecorder, MockSessionRecorder, SessionCompletion, SessionDraft, SessionRecord,
    SessionRecorder,
};
pub use stats::{HttpStatsReporter, MockStatsReporter, StatsReporter};

use std::time::Duration;

use url::Url;

/// Request timeout applied to every backend call.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Builds a reqwest client with the shared timeout.
pub(crate) fn http_client() -> Result<reqwest::Client, BackendError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// Parses and normalizes an API base URL.
pub(crate) fn parse_base_url(base: &str) -> Result<Url, BackendError> {
    let url = Url::parse(base).map_err(|e| BackendError::InvalidBaseUrl(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(BackendError::InvalidBaseUrl(format!(
            "{} cannot be used as a base URL",
            base
        )));
    }
    Ok(url)
}

/// Appends path segments to the base URL.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, BackendError> {
    let mut url = base.clone();
    {
        let mut parts = url
            .path_segments_mut()
            .map_err(|_| BackendError::InvalidBaseUrl("base URL cannot be a base".to_string()))?;
        for segment in segments {
            parts.push(segment);
        }
    }
    Ok(url)
}

/// Maps a non-success HTTP response to a backend error.
pub(crate) async fn status_error(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BackendError::Status { status, body }
}
