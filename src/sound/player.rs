//! Chime player implementation using rodio.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use super::chime::chime_data;
use super::error::SoundError;

/// A chime player backed by rodio.
///
/// The output stream is not `Send`; the daemon keeps the player on the
/// `ChimeService` thread. Playback is non-blocking: the chime continues in
/// the background after `play` returns.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether chime playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new chime player.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, playback is silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Plays the completion chime.
    ///
    /// Non-blocking; the chime plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the chime cannot be decoded or played.
    pub fn play(&self) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("chime disabled, skipping");
            return Ok(());
        }

        let decoder = Decoder::new(Cursor::new(chime_data()))
            .map_err(|e| SoundError::Decode(e.to_string()))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::Stream(e.to_string()))?;

        sink.append(decoder);
        sink.detach(); // Non-blocking: chime continues after return

        debug!("chime playback started (detached)");
        Ok(())
    }

    /// Returns true if chime playback is currently disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables chime playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
    }

    /// Disables chime playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
