//! Chime playback service.
//!
//! Rodio's output stream is not `Send`, so the player lives on a dedicated
//! thread and receives play commands over a channel. The service handle is
//! cheap to clone and safe to share across async tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use super::error::SoundError;
use super::player::RodioSoundPlayer;
use super::SoundPlayer;

/// Handle to the chime playback thread.
#[derive(Debug, Clone)]
pub struct ChimeService {
    /// Play commands; the thread exits when all senders drop
    tx: Sender<()>,
    /// Gate checked before a command is sent
    disabled: Arc<AtomicBool>,
}

impl ChimeService {
    /// Spawns the playback thread and returns a handle.
    ///
    /// If no audio device is available the thread drains commands without
    /// playing; a single warning is logged at startup.
    pub fn spawn(disabled: bool) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<()>();

        std::thread::spawn(move || {
            let player = match RodioSoundPlayer::new(false) {
                Ok(player) => Some(player),
                Err(e) => {
                    warn!("audio not available, chime disabled: {}", e);
                    None
                }
            };

            for () in rx {
                match &player {
                    Some(player) => {
                        if let Err(e) = player.play() {
                            warn!("failed to play completion chime: {}", e);
                        }
                    }
                    None => debug!("no audio device, skipping chime"),
                }
            }
        });

        Self {
            tx,
            disabled: Arc::new(AtomicBool::new(disabled)),
        }
    }
}

impl SoundPlayer for ChimeService {
    fn play(&self) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            return Ok(());
        }
        self.tx
            .send(())
            .map_err(|_| SoundError::Playback("chime thread exited".to_string()))
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
    }
}
