//! Core data types for the focus timer.
//!
//! This module defines the data structures used for:
//! - Timer state management
//! - Timer configuration with validation
//! - IPC request/response serialization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// SessionKind
// ============================================================================

/// The kind of segment the timer is currently cycling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// A focused work segment
    Work,
    /// A short break between work segments
    ShortBreak,
    /// A long break after `sessions_until_long_break` work segments
    LongBreak,
}

impl SessionKind {
    /// Returns the string representation of the session kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::ShortBreak => "short_break",
            SessionKind::LongBreak => "long_break",
        }
    }

    /// Returns true if this is a break segment of either length.
    pub fn is_break(&self) -> bool {
        matches!(self, SessionKind::ShortBreak | SessionKind::LongBreak)
    }
}

impl Default for SessionKind {
    fn default() -> Self {
        SessionKind::Work
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

fn default_work_minutes() -> u32 {
    25
}

fn default_short_break_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

fn default_sessions_until_long_break() -> u32 {
    4
}

fn default_sound_enabled() -> bool {
    true
}

/// Configuration for the focus timer.
///
/// Persisted as a JSON blob per profile. Fields carry serde defaults so
/// blobs written by older versions keep parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work segment duration in minutes
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Short break duration in minutes
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    /// Long break duration in minutes
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// Completed work segments between long breaks
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u32,
    /// Whether breaks start counting down without an explicit start
    #[serde(default)]
    pub auto_start_breaks: bool,
    /// Whether work segments start counting down without an explicit start
    #[serde(default)]
    pub auto_start_work: bool,
    /// Whether the completion chime is played
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_until_long_break: default_sessions_until_long_break(),
            auto_start_breaks: false,
            auto_start_work: false,
            sound_enabled: default_sound_enabled(),
        }
    }
}

impl TimerConfig {
    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.work_minutes < 1 {
            return Err("work duration must be at least 1 minute".to_string());
        }
        if self.short_break_minutes < 1 {
            return Err("short break duration must be at least 1 minute".to_string());
        }
        if self.long_break_minutes < 1 {
            return Err("long break duration must be at least 1 minute".to_string());
        }
        if self.sessions_until_long_break < 1 {
            return Err("sessions until long break must be at least 1".to_string());
        }
        Ok(())
    }

    /// Returns the configured duration of the given segment kind, in seconds.
    pub fn duration_seconds(&self, kind: SessionKind) -> u32 {
        let minutes = match kind {
            SessionKind::Work => self.work_minutes,
            SessionKind::ShortBreak => self.short_break_minutes,
            SessionKind::LongBreak => self.long_break_minutes,
        };
        minutes * 60
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The authoritative runtime state of the timer.
///
/// Exactly one instance lives in the daemon; display surfaces read it
/// through IPC snapshots and never hold independent copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    /// Kind of the current segment
    pub kind: SessionKind,
    /// Duration of the current segment in seconds
    pub total_seconds: u32,
    /// Seconds left in the current segment
    pub remaining_seconds: u32,
    /// Whether the countdown is currently running
    pub running: bool,
    /// Completed work segments since daemon start
    pub sessions_completed: u32,
    /// Distractions logged during the current work stretch
    pub distraction_count: u32,
    /// Backend record id for the current work segment, once created
    pub active_record_id: Option<String>,
    /// Timer configuration
    pub config: TimerConfig,
    /// Wall-clock start of the current segment (first start only)
    #[serde(skip)]
    pub(crate) started_at: Option<DateTime<Utc>>,
    /// Whether a record create has been requested for the current segment
    #[serde(skip)]
    pub(crate) record_requested: bool,
    /// Monotonic segment counter; guards stale record attachment
    #[serde(skip)]
    pub(crate) segment_epoch: u64,
}

impl TimerState {
    /// Creates a new state: an idle work segment at full duration.
    pub fn new(config: TimerConfig) -> Self {
        let total = config.duration_seconds(SessionKind::Work);
        Self {
            kind: SessionKind::Work,
            total_seconds: total,
            remaining_seconds: total,
            running: false,
            sessions_completed: 0,
            distraction_count: 0,
            active_record_id: None,
            config,
            started_at: None,
            record_requested: false,
            segment_epoch: 0,
        }
    }

    /// Loads a fresh segment of the given kind at its configured duration.
    ///
    /// Leaves the segment idle; counters are managed by the engine.
    pub(crate) fn begin_segment(&mut self, kind: SessionKind) {
        let total = self.config.duration_seconds(kind);
        self.kind = kind;
        self.total_seconds = total;
        self.remaining_seconds = total;
        self.running = false;
        self.started_at = None;
        self.record_requested = false;
        self.segment_epoch += 1;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the segment has completed (reached 0).
    pub(crate) fn tick(&mut self) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        self.remaining_seconds == 0
    }

    /// Returns true if the countdown is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true if the current segment has been started at least once.
    pub fn has_begun(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns true if the segment was started and is currently halted.
    pub fn is_paused(&self) -> bool {
        !self.running && self.has_begun()
    }

    /// Returns the run state as a string for IPC snapshots.
    pub fn run_state_str(&self) -> &'static str {
        if self.running {
            "running"
        } else if self.has_begun() {
            "paused"
        } else {
            "idle"
        }
    }
}

// ============================================================================
// IPC Types
// ============================================================================

/// Partial configuration carried by the configure command.
///
/// Unset fields keep their current value; callers saving settings must
/// supply the full configuration (the settings store has no merge).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigureParams {
    /// Work duration in minutes
    #[serde(rename = "workMinutes", skip_serializing_if = "Option::is_none")]
    pub work_minutes: Option<u32>,
    /// Short break duration in minutes
    #[serde(rename = "shortBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub short_break_minutes: Option<u32>,
    /// Long break duration in minutes
    #[serde(rename = "longBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub long_break_minutes: Option<u32>,
    /// Work segments between long breaks
    #[serde(
        rename = "sessionsUntilLongBreak",
        skip_serializing_if = "Option::is_none"
    )]
    pub sessions_until_long_break: Option<u32>,
    /// Auto-start breaks flag
    #[serde(rename = "autoStartBreaks", skip_serializing_if = "Option::is_none")]
    pub auto_start_breaks: Option<bool>,
    /// Auto-start work flag
    #[serde(rename = "autoStartWork", skip_serializing_if = "Option::is_none")]
    pub auto_start_work: Option<bool>,
    /// Completion chime flag
    #[serde(rename = "soundEnabled", skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
}

impl ConfigureParams {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.work_minutes.is_none()
            && self.short_break_minutes.is_none()
            && self.long_break_minutes.is_none()
            && self.sessions_until_long_break.is_none()
            && self.auto_start_breaks.is_none()
            && self.auto_start_work.is_none()
            && self.sound_enabled.is_none()
    }

    /// Merges the set fields over the given configuration.
    pub fn apply_to(&self, base: &TimerConfig) -> TimerConfig {
        let mut config = base.clone();
        if let Some(work) = self.work_minutes {
            config.work_minutes = work;
        }
        if let Some(short) = self.short_break_minutes {
            config.short_break_minutes = short;
        }
        if let Some(long) = self.long_break_minutes {
            config.long_break_minutes = long;
        }
        if let Some(sessions) = self.sessions_until_long_break {
            config.sessions_until_long_break = sessions;
        }
        if let Some(auto) = self.auto_start_breaks {
            config.auto_start_breaks = auto;
        }
        if let Some(auto) = self.auto_start_work {
            config.auto_start_work = auto;
        }
        if let Some(sound) = self.sound_enabled {
            config.sound_enabled = sound;
        }
        config
    }
}

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Reset the current segment to its full duration
    Reset,
    /// Log a distraction during the current work stretch
    Distraction,
    /// Query the current state
    Status,
    /// Replace the timer configuration
    Configure {
        /// Fields to change
        #[serde(flatten)]
        params: ConfigureParams,
    },
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Run state ("idle", "running", "paused")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Current segment kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    /// Remaining seconds in the current segment
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Total seconds of the current segment
    #[serde(rename = "totalSeconds", skip_serializing_if = "Option::is_none")]
    pub total_seconds: Option<u32>,
    /// Completed work segments
    #[serde(rename = "sessionsCompleted", skip_serializing_if = "Option::is_none")]
    pub sessions_completed: Option<u32>,
    /// Distractions logged in the current work stretch
    #[serde(rename = "distractionCount", skip_serializing_if = "Option::is_none")]
    pub distraction_count: Option<u32>,
}

impl ResponseData {
    /// Creates response data from timer state.
    pub fn from_timer_state(state: &TimerState) -> Self {
        Self {
            state: Some(state.run_state_str().to_string()),
            session: Some(state.kind.as_str().to_string()),
            remaining_seconds: Some(state.remaining_seconds),
            total_seconds: Some(state.total_seconds),
            sessions_completed: Some(state.sessions_completed),
            distraction_count: Some(state.distraction_count),
        }
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // SessionKind Tests
    // ------------------------------------------------------------------------

    mod session_kind_tests {
        use super::*;

        #[test]
        fn test_default_is_work() {
            assert_eq!(SessionKind::default(), SessionKind::Work);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(SessionKind::Work.as_str(), "work");
            assert_eq!(SessionKind::ShortBreak.as_str(), "short_break");
            assert_eq!(SessionKind::LongBreak.as_str(), "long_break");
        }

        #[test]
        fn test_is_break() {
            assert!(!SessionKind::Work.is_break());
            assert!(SessionKind::ShortBreak.is_break());
            assert!(SessionKind::LongBreak.is_break());
        }

        #[test]
        fn test_serialize_deserialize() {
            let kind = SessionKind::ShortBreak;
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, "\"short_break\"");

            let deserialized: SessionKind = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, SessionKind::ShortBreak);
        }
    }

    // ------------------------------------------------------------------------
    // TimerConfig Tests
    // ------------------------------------------------------------------------

    mod timer_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = TimerConfig::default();
            assert_eq!(config.work_minutes, 25);
            assert_eq!(config.short_break_minutes, 5);
            assert_eq!(config.long_break_minutes, 15);
            assert_eq!(config.sessions_until_long_break, 4);
            assert!(!config.auto_start_breaks);
            assert!(!config.auto_start_work);
            assert!(config.sound_enabled);
        }

        #[test]
        fn test_validate_success() {
            assert!(TimerConfig::default().validate().is_ok());

            let config = TimerConfig {
                work_minutes: 1,
                short_break_minutes: 1,
                long_break_minutes: 1,
                sessions_until_long_break: 1,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_validate_zero_work_minutes() {
            let config = TimerConfig {
                work_minutes: 0,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_zero_short_break() {
            let config = TimerConfig {
                short_break_minutes: 0,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_zero_long_break() {
            let config = TimerConfig {
                long_break_minutes: 0,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_zero_sessions_until_long_break() {
            let config = TimerConfig {
                sessions_until_long_break: 0,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_duration_seconds() {
            let config = TimerConfig::default();
            assert_eq!(config.duration_seconds(SessionKind::Work), 1500);
            assert_eq!(config.duration_seconds(SessionKind::ShortBreak), 300);
            assert_eq!(config.duration_seconds(SessionKind::LongBreak), 900);
        }

        #[test]
        fn test_deserialize_empty_blob_uses_defaults() {
            let config: TimerConfig = serde_json::from_str("{}").unwrap();
            assert_eq!(config, TimerConfig::default());
        }

        #[test]
        fn test_deserialize_partial_blob_uses_defaults() {
            let json = r#"{"work_minutes": 50, "auto_start_breaks": true}"#;
            let config: TimerConfig = serde_json::from_str(json).unwrap();
            assert_eq!(config.work_minutes, 50);
            assert!(config.auto_start_breaks);
            assert_eq!(config.short_break_minutes, 5);
            assert_eq!(config.sessions_until_long_break, 4);
            assert!(config.sound_enabled);
        }

        #[test]
        fn test_serialize_deserialize_round_trip() {
            let config = TimerConfig {
                work_minutes: 50,
                short_break_minutes: 10,
                long_break_minutes: 30,
                sessions_until_long_break: 3,
                auto_start_breaks: true,
                auto_start_work: true,
                sound_enabled: false,
            };
            let json = serde_json::to_string(&config).unwrap();
            let deserialized: TimerConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config, deserialized);
        }
    }

    // ------------------------------------------------------------------------
    // TimerState Tests
    // ------------------------------------------------------------------------

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_new_state() {
            let state = TimerState::new(TimerConfig::default());

            assert_eq!(state.kind, SessionKind::Work);
            assert_eq!(state.total_seconds, 25 * 60);
            assert_eq!(state.remaining_seconds, 25 * 60);
            assert!(!state.running);
            assert_eq!(state.sessions_completed, 0);
            assert_eq!(state.distraction_count, 0);
            assert!(state.active_record_id.is_none());
            assert_eq!(state.run_state_str(), "idle");
        }

        #[test]
        fn test_begin_segment() {
            let mut state = TimerState::new(TimerConfig::default());
            let epoch = state.segment_epoch;

            state.begin_segment(SessionKind::ShortBreak);

            assert_eq!(state.kind, SessionKind::ShortBreak);
            assert_eq!(state.total_seconds, 5 * 60);
            assert_eq!(state.remaining_seconds, 5 * 60);
            assert!(!state.running);
            assert!(state.started_at.is_none());
            assert!(!state.record_requested);
            assert_eq!(state.segment_epoch, epoch + 1);
        }

        #[test]
        fn test_tick() {
            let mut state = TimerState::new(TimerConfig::default());
            state.remaining_seconds = 2;

            assert!(!state.tick());
            assert_eq!(state.remaining_seconds, 1);

            assert!(state.tick());
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_tick_at_zero_stays_at_zero() {
            let mut state = TimerState::new(TimerConfig::default());
            state.remaining_seconds = 0;

            assert!(state.tick());
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_run_state_str() {
            let mut state = TimerState::new(TimerConfig::default());
            assert_eq!(state.run_state_str(), "idle");

            state.started_at = Some(Utc::now());
            state.running = true;
            assert_eq!(state.run_state_str(), "running");
            assert!(state.is_running());

            state.running = false;
            assert_eq!(state.run_state_str(), "paused");
            assert!(state.is_paused());
        }
    }

    // ------------------------------------------------------------------------
    // IPC Types Tests
    // ------------------------------------------------------------------------

    mod ipc_tests {
        use super::*;

        #[test]
        fn test_configure_params_default_is_empty() {
            let params = ConfigureParams::default();
            assert!(params.is_empty());
        }

        #[test]
        fn test_configure_params_apply_to() {
            let base = TimerConfig::default();
            let params = ConfigureParams {
                work_minutes: Some(50),
                sound_enabled: Some(false),
                ..Default::default()
            };

            let merged = params.apply_to(&base);

            assert_eq!(merged.work_minutes, 50);
            assert!(!merged.sound_enabled);
            assert_eq!(merged.short_break_minutes, base.short_break_minutes);
            assert_eq!(
                merged.sessions_until_long_break,
                base.sessions_until_long_break
            );
        }

        #[test]
        fn test_ipc_request_simple_commands_serialize() {
            assert_eq!(
                serde_json::to_string(&IpcRequest::Start).unwrap(),
                r#"{"command":"start"}"#
            );
            assert_eq!(
                serde_json::to_string(&IpcRequest::Pause).unwrap(),
                r#"{"command":"pause"}"#
            );
            assert_eq!(
                serde_json::to_string(&IpcRequest::Reset).unwrap(),
                r#"{"command":"reset"}"#
            );
            assert_eq!(
                serde_json::to_string(&IpcRequest::Distraction).unwrap(),
                r#"{"command":"distraction"}"#
            );
            assert_eq!(
                serde_json::to_string(&IpcRequest::Status).unwrap(),
                r#"{"command":"status"}"#
            );
        }

        #[test]
        fn test_ipc_request_configure_serialize() {
            let request = IpcRequest::Configure {
                params: ConfigureParams {
                    work_minutes: Some(30),
                    auto_start_breaks: Some(true),
                    ..Default::default()
                },
            };

            let json = serde_json::to_string(&request).unwrap();
            assert!(json.contains("\"command\":\"configure\""));
            assert!(json.contains("\"workMinutes\":30"));
            assert!(json.contains("\"autoStartBreaks\":true"));
            assert!(!json.contains("soundEnabled"));
        }

        #[test]
        fn test_ipc_request_configure_deserialize() {
            let json = r#"{"command":"configure","workMinutes":45,"soundEnabled":false}"#;
            let request: IpcRequest = serde_json::from_str(json).unwrap();

            match request {
                IpcRequest::Configure { params } => {
                    assert_eq!(params.work_minutes, Some(45));
                    assert_eq!(params.sound_enabled, Some(false));
                    assert!(params.short_break_minutes.is_none());
                }
                _ => panic!("Expected Configure request"),
            }
        }

        #[test]
        fn test_ipc_request_all_commands_deserialize() {
            let commands = vec![
                (r#"{"command":"start"}"#, "start"),
                (r#"{"command":"pause"}"#, "pause"),
                (r#"{"command":"reset"}"#, "reset"),
                (r#"{"command":"distraction"}"#, "distraction"),
                (r#"{"command":"status"}"#, "status"),
                (r#"{"command":"configure"}"#, "configure"),
            ];

            for (json, expected) in commands {
                let request: IpcRequest = serde_json::from_str(json).unwrap();
                match (&request, expected) {
                    (IpcRequest::Start, "start") => {}
                    (IpcRequest::Pause, "pause") => {}
                    (IpcRequest::Reset, "reset") => {}
                    (IpcRequest::Distraction, "distraction") => {}
                    (IpcRequest::Status, "status") => {}
                    (IpcRequest::Configure { .. }, "configure") => {}
                    _ => panic!("Unexpected request type for {}", json),
                }
            }
        }

        #[test]
        fn test_response_data_from_timer_state() {
            let mut state = TimerState::new(TimerConfig::default());
            state.started_at = Some(Utc::now());
            state.running = true;
            state.remaining_seconds = 1200;
            state.sessions_completed = 3;
            state.distraction_count = 2;

            let data = ResponseData::from_timer_state(&state);

            assert_eq!(data.state, Some("running".to_string()));
            assert_eq!(data.session, Some("work".to_string()));
            assert_eq!(data.remaining_seconds, Some(1200));
            assert_eq!(data.total_seconds, Some(1500));
            assert_eq!(data.sessions_completed, Some(3));
            assert_eq!(data.distraction_count, Some(2));
        }

        #[test]
        fn test_ipc_response_success() {
            let response = IpcResponse::success("Timer started", None);
            assert_eq!(response.status, "success");
            assert_eq!(response.message, "Timer started");
            assert!(response.data.is_none());
        }

        #[test]
        fn test_ipc_response_error() {
            let response = IpcResponse::error("timer is already running");
            assert_eq!(response.status, "error");
            assert_eq!(response.message, "timer is already running");
            assert!(response.data.is_none());
        }

        #[test]
        fn test_ipc_response_serialize_omits_none_fields() {
            let response = IpcResponse::success(
                "OK",
                Some(ResponseData {
                    state: Some("running".to_string()),
                    remaining_seconds: Some(1500),
                    ..Default::default()
                }),
            );

            let json = serde_json::to_string(&response).unwrap();
            assert!(json.contains("\"status\":\"success\""));
            assert!(json.contains("\"remainingSeconds\":1500"));
            assert!(!json.contains("distractionCount"));
        }

        #[test]
        fn test_ipc_response_deserialize() {
            let json = r#"{"status":"success","message":"OK","data":{"state":"paused","session":"short_break","remainingSeconds":90}}"#;
            let response: IpcResponse = serde_json::from_str(json).unwrap();

            assert_eq!(response.status, "success");
            let data = response.data.unwrap();
            assert_eq!(data.state, Some("paused".to_string()));
            assert_eq!(data.session, Some("short_break".to_string()));
            assert_eq!(data.remaining_seconds, Some(90));
        }
    }
}
