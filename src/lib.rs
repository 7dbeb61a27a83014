//! Focus Timer Library
//!
//! This library provides the core functionality for the focus timer CLI.
//! It includes:
//! - Timer engine cycling work segments and breaks
//! - IPC server/client for daemon-CLI communication
//! - Per-profile settings persistence
//! - Best-effort backend reporting (session records, stats)
//! - Completion chime playback
//! - CLI command parsing and display utilities

pub mod backend;
pub mod cli;
pub mod daemon;
pub mod settings;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ConfigureParams, IpcRequest, IpcResponse, ResponseData, SessionKind, TimerConfig, TimerState,
};

// Re-export daemon types
pub use daemon::{DaemonOptions, TimerEngine, TimerEvent, WorkSummary};

// Re-export backend types
pub use backend::{
    BackendError, HttpSessionRecorder, HttpStatsReporter, MockSessionRecorder, MockStatsReporter,
    SessionCompletion, SessionDraft, SessionRecord, SessionRecorder, StatsReporter,
};

// Re-export settings types
pub use settings::{SettingsError, SettingsStore};

// Re-export sound types
pub use sound::{ChimeService, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer};
