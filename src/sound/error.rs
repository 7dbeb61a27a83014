//! Sound system error types.
//!
//! All chime errors are recoverable: playback is best-effort and the timer
//! continues regardless.

use thiserror::Error;

/// Errors that can occur in the chime playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., headless environment).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to decode the embedded chime.
    #[error("failed to decode chime: {0}")]
    Decode(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    Stream(String),

    /// Generic playback error.
    #[error("chime playback failed: {0}")]
    Playback(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::Stream(_))
    }
}
