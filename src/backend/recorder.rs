//! Session recorder client.
//!
//! The recorder owns `FocusSessionRecord`s on the backend. The daemon
//! creates a record when a work segment first starts and completes it when
//! the segment finishes. Records are bookkeeping only: the countdown is the
//! source of truth and never waits on these calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{endpoint, http_client, parse_base_url, status_error, BackendError};

// ============================================================================
// Payloads
// ============================================================================

/// Draft sent when a work segment starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    /// Client-generated id, lets the backend dedupe retried creates
    pub client_id: Uuid,
    /// Profile the session belongs to
    pub profile: String,
    /// Wall-clock start of the segment
    pub start_time: DateTime<Utc>,
    /// Configured duration in minutes
    pub planned_duration_minutes: u32,
    /// Segment kind; always "work", breaks are not recorded
    pub kind: String,
}

impl SessionDraft {
    /// Creates a draft for a work segment.
    pub fn work(
        profile: impl Into<String>,
        start_time: DateTime<Utc>,
        planned_duration_minutes: u32,
    ) -> Self {
        Self {
            client_id: Uuid::new_v4(),
            profile: profile.into(),
            start_time,
            planned_duration_minutes,
            kind: "work".to_string(),
        }
    }
}

/// Record returned by the backend on create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Backend-assigned record id
    pub id: String,
}

/// Completion payload sent when a work segment finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCompletion {
    /// Wall-clock end of the segment
    pub end_time: DateTime<Utc>,
    /// Always true; abandoned segments are never completed
    pub completed: bool,
    /// Wall-clock elapsed minutes, not the configured duration
    pub actual_duration_minutes: u32,
    /// Distractions accumulated during the segment
    pub distraction_count: u32,
}

// ============================================================================
// SessionRecorder
// ============================================================================

/// Client for the focus-session record collaborator.
#[async_trait]
pub trait SessionRecorder: Send + Sync {
    /// Creates a session record, returning the backend's record.
    async fn create(&self, draft: &SessionDraft) -> Result<SessionRecord, BackendError>;

    /// Marks an existing record completed.
    async fn complete(
        &self,
        record_id: &str,
        completion: &SessionCompletion,
    ) -> Result<(), BackendError>;
}

// ============================================================================
// HttpSessionRecorder
// ============================================================================

/// Reqwest-backed session recorder.
#[derive(Debug, Clone)]
pub struct HttpSessionRecorder {
    client: reqwest::Client,
    base: Url,
}

impl HttpSessionRecorder {
    /// Creates a recorder for the given API base URL.
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

    fn sessions_endpoint(&self) -> Result<Url, BackendError> {
        endpoint(&self.base, &["focus-sessions"])
    }

    fn session_endpoint(&self, record_id: &str) -> Result<Url, BackendError> {
        endpoint(&self.base, &["focus-sessions", record_id])
    }
}

#[async_trait]
impl SessionRecorder for HttpSessionRecorder {
    async fn create(&self, draft: &SessionDraft) -> Result<SessionRecord, BackendError> {
        let url = self.sessions_endpoint()?;
        let response = self.client.post(url).json(draft).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let record = response.json::<SessionRecord>().await?;
        Ok(record)
    }

    async fn complete(
        &self,
        record_id: &str,
        completion: &SessionCompletion,
    ) -> Result<(), BackendError> {
        let url = self.session_endpoint(record_id)?;
        let response = self.client.put(url).json(completion).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(())
    }
}

// ============================================================================
// MockSessionRecorder
// ============================================================================

/// Mock session recorder for testing.
#[derive(Debug, Default)]
pub struct MockSessionRecorder {
    created: std::sync::Mutex<Vec<SessionDraft>>,
    completed: std::sync::Mutex<Vec<(String, SessionCompletion)>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSessionRecorder {
    /// Creates a new mock recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent calls fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Returns the drafts passed to `create`.
    pub fn created(&self) -> Vec<SessionDraft> {
        self.created.lock().unwrap().clone()
    }

    /// Returns the completions passed to `complete`.
    pub fn completed(&self) -> Vec<(String, SessionCompletion)> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRecorder for MockSessionRecorder {
    async fn create(&self, draft: &SessionDraft) -> Result<SessionRecord, BackendError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push(draft.clone());
        Ok(SessionRecord {
            id: format!("session-{}", created.len()),
        })
    }

    async fn complete(
        &self,
        record_id: &str,
        completion: &SessionCompletion,
    ) -> Result<(), BackendError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        self.completed
            .lock()
            .unwrap()
            .push((record_id.to_string(), completion.clone()));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_draft_work() {
        let now = Utc::now();
        let draft = SessionDraft::work("alice", now, 25);

        assert_eq!(draft.profile, "alice");
        assert_eq!(draft.start_time, now);
        assert_eq!(draft.planned_duration_minutes, 25);
        assert_eq!(draft.kind, "work");
    }

    #[test]
    fn test_session_draft_serialize_camel_case() {
        let draft = SessionDraft::work("alice", Utc::now(), 25);
        let json = serde_json::to_string(&draft).unwrap();

        assert!(json.contains("\"clientId\""));
        assert!(json.contains("\"startTime\""));
        assert!(json.contains("\"plannedDurationMinutes\":25"));
        assert!(json.contains("\"kind\":\"work\""));
    }

    #[test]
    fn test_session_completion_serialize_camel_case() {
        let completion = SessionCompletion {
            end_time: Utc::now(),
            completed: true,
            actual_duration_minutes: 26,
            distraction_count: 3,
        };
        let json = serde_json::to_string(&completion).unwrap();

        assert!(json.contains("\"endTime\""));
        assert!(json.contains("\"completed\":true"));
        assert!(json.contains("\"actualDurationMinutes\":26"));
        assert!(json.contains("\"distractionCount\":3"));
    }

    #[test]
    fn test_session_record_deserialize() {
        let record: SessionRecord =
            serde_json::from_str(r#"{"id":"abc-123","extra":"ignored"}"#).unwrap();
        assert_eq!(record.id, "abc-123");
    }

    #[test]
    fn test_http_recorder_endpoints() {
        let recorder = HttpSessionRecorder::new("http://localhost:4000/api").unwrap();

        assert_eq!(
            recorder.sessions_endpoint().unwrap().as_str(),
            "http://localhost:4000/api/focus-sessions"
        );
        assert_eq!(
            recorder.session_endpoint("abc-123").unwrap().as_str(),
            "http://localhost:4000/api/focus-sessions/abc-123"
        );
    }

    #[test]
    fn test_http_recorder_rejects_bad_base() {
        assert!(HttpSessionRecorder::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_mock_recorder_records_calls() {
        let mock = MockSessionRecorder::new();
        let draft = SessionDraft::work("alice", Utc::now(), 25);

        let record = mock.create(&draft).await.unwrap();
        assert_eq!(record.id, "session-1");
        assert_eq!(mock.created().len(), 1);

        let completion = SessionCompletion {
            end_time: Utc::now(),
            completed: true,
            actual_duration_minutes: 25,
            distraction_count: 0,
        };
        mock.complete(&record.id, &completion).await.unwrap();

        let completed = mock.completed();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].0, "session-1");
    }

    #[tokio::test]
    async fn test_mock_recorder_failure_mode() {
        let mock = MockSessionRecorder::new();
        mock.set_should_fail(true);

        let draft = SessionDraft::work("alice", Utc::now(), 25);
        assert!(mock.create(&draft).await.is_err());
        assert!(mock.created().is_empty());
    }
}
