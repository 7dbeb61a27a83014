//! Completion chime playback.
//!
//! A single embedded chime played when a segment completes. Playback is
//! best-effort: failures are logged by the caller and never interrupt the
//! countdown, and the whole subsystem degrades to silence when no audio
//! device exists.

mod chime;
mod error;
mod player;
mod service;

pub use chime::{chime_data, CHIME_WAV};
pub use error::SoundError;
pub use player::RodioSoundPlayer;
pub use service::ChimeService;

/// Trait for chime playback implementations.
///
/// Abstracts playback so the notifier can run against a mock in tests.
pub trait SoundPlayer {
    /// Plays the completion chime. Non-blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self) -> Result<(), SoundError>;

    /// Returns true if chime playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables chime playback.
    fn enable(&self);

    /// Disables chime playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Mock chime player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    plays: std::sync::atomic::AtomicUsize,
    disabled: std::sync::atomic::AtomicBool,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    /// Creates a new mock player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent plays fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Returns how many chimes were actually played.
    pub fn play_count(&self) -> usize {
        self.plays.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::Playback("mock failure".to_string()));
        }
        if self.disabled.load(std::sync::atomic::Ordering::SeqCst) {
            return Ok(());
        }
        self.plays
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled
            .store(false, std::sync::atomic::Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}
