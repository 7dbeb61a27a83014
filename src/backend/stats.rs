//! Stats reporter client.
//!
//! Reports per-profile aggregates once per completed work segment:
//! +1 session and +elapsed focus minutes. Fire-and-forget like the
//! session recorder.

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use super::{endpoint, http_client, parse_base_url, status_error, BackendError};

// ============================================================================
// StatsReporter
// ============================================================================

/// Client for the stats collaborator.
#[async_trait]
pub trait StatsReporter: Send + Sync {
    /// Adds one completed session for the profile.
    async fn add_completed_session(&self, profile: &str) -> Result<(), BackendError>;

    /// Adds focus minutes for the profile.
    async fn add_focus_minutes(&self, profile: &str, minutes: u32) -> Result<(), BackendError>;
}

// ============================================================================
// HttpStatsReporter
// ============================================================================

#[derive(Debug, Serialize)]
struct SessionIncrement<'a> {
    profile: &'a str,
    count: u32,
}

#[derive(Debug, Serialize)]
struct MinutesIncrement<'a> {
    profile: &'a str,
    minutes: u32,
}

/// Reqwest-backed stats reporter.
#[derive(Debug, Clone)]
pub struct HttpStatsReporter {
    client: reqwest::Client,
    base: Url,
}

impl HttpStatsReporter {
    /// Creates a reporter for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client
    /// cannot be built.
    pub fn new(base: &str) -> Result<Self, BackendError> {
        Ok(Self {
            client: http_client()?,
            base: parse_base_url(base)?,
        })
    }

    async fn post<T: Serialize + Sync>(
        &self,
        segments: &[&str],
        payload: &T,
    ) -> Result<(), BackendError> {
        let url = endpoint(&self.base, segments)?;
        let response = self.client.post(url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(())
    }
}

#[async_trait]
impl StatsReporter for HttpStatsReporter {
    async fn add_completed_session(&self, profile: &str) -> Result<(), BackendError> {
        self.post(&["stats", "sessions"], &SessionIncrement { profile, count: 1 })
            .await
    }

    async fn add_focus_minutes(&self, profile: &str, minutes: u32) -> Result<(), BackendError> {
        self.post(
            &["stats", "focus-minutes"],
            &MinutesIncrement { profile, minutes },
        )
        .await
    }
}

// ============================================================================
// MockStatsReporter
// ============================================================================

/// Mock stats reporter for testing.
#[derive(Debug, Default)]
pub struct MockStatsReporter {
    sessions: std::sync::atomic::AtomicU32,
    minutes: std::sync::atomic::AtomicU32,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockStatsReporter {
    /// Creates a new mock reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent calls fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Returns the accumulated session count.
    pub fn sessions(&self) -> u32 {
        self.sessions.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Returns the accumulated focus minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsReporter for MockStatsReporter {
    async fn add_completed_session(&self, _profile: &str) -> Result<(), BackendError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        self.sessions
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    async fn add_focus_minutes(&self, _profile: &str, minutes: u32) -> Result<(), BackendError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        self.minutes
            .fetch_add(minutes, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
