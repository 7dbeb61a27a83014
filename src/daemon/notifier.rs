//! Event notifier for the focus timer daemon.
//!
//! Consumes the engine's event stream and performs every side effect off
//! the tick path: the completion chime, session record bookkeeping, and
//! stats reporting. The engine pushes events to an unbounded channel and
//! never waits on this task, so a slow backend can only delay other side
//! effects, never the countdown.
//!
//! Every failure here is logged and swallowed; nothing propagates back to
//! the timer.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::backend::{SessionCompletion, SessionDraft, SessionRecorder, StatsReporter};
use crate::sound::SoundPlayer;

use super::timer::{TimerEngine, TimerEvent, WorkSummary};

// ============================================================================
// Notifier
// ============================================================================

/// Side-effect dispatcher for timer events.
pub struct Notifier {
    /// Engine handle, used to attach created record ids
    engine: Arc<Mutex<TimerEngine>>,
    /// Event stream from the engine
    events: mpsc::UnboundedReceiver<TimerEvent>,
    /// Completion chime
    player: Arc<dyn SoundPlayer + Send + Sync>,
    /// Session record collaborator
    recorder: Arc<dyn SessionRecorder>,
    /// Stats collaborator
    stats: Arc<dyn StatsReporter>,
    /// Profile the daemon is running for
    profile: String,
}

impl Notifier {
    /// Creates a notifier wired to the given collaborators.
    pub fn new(
        engine: Arc<Mutex<TimerEngine>>,
        events: mpsc::UnboundedReceiver<TimerEvent>,
        player: Arc<dyn SoundPlayer + Send + Sync>,
        recorder: Arc<dyn SessionRecorder>,
        stats: Arc<dyn StatsReporter>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            events,
            player,
            recorder,
            stats,
            profile: profile.into(),
        }
    }

    /// Processes events until the engine side of the channel closes.
    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            self.handle(event).await;
        }
        debug!("event channel closed, notifier exiting");
    }

    /// Handles a single timer event.
    async fn handle(&self, event: TimerEvent) {
        match event {
            TimerEvent::WorkStarted {
                epoch,
                planned_minutes,
                started_at,
            } => {
                let draft = SessionDraft::work(&self.profile, started_at, planned_minutes);
                match self.recorder.create(&draft).await {
                    Ok(record) => {
                        self.engine.lock().await.attach_record(epoch, record.id);
                    }
                    Err(e) => warn!("failed to create session record: {}", e),
                }
            }
            TimerEvent::WorkCompleted(summary) => {
                // Chime first, then bookkeeping, matching the completion order
                self.chime();
                self.report_work(summary).await;
            }
            TimerEvent::BreakCompleted { .. } => {
                self.chime();
            }
            TimerEvent::Configured { sound_enabled } => {
                if sound_enabled {
                    self.player.enable();
                } else {
                    self.player.disable();
                }
            }
            _ => {}
        }
    }

    /// Plays the completion chime, best-effort.
    fn chime(&self) {
        if let Err(e) = self.player.play() {
            warn!("failed to play completion chime: {}", e);
        }
    }

    /// Reports a completed work segment to the backend collaborators.
    async fn report_work(&self, summary: WorkSummary) {
        match &summary.record_id {
            Some(record_id) => {
                let completion = SessionCompletion {
                    end_time: summary.ended_at,
                    completed: true,
                    actual_duration_minutes: summary.actual_minutes,
                    distraction_count: summary.distraction_count,
                };
                if let Err(e) = self.recorder.complete(record_id, &completion).await {
                    warn!("failed to complete session record {}: {}", record_id, e);
                }
            }
            None => debug!("work segment finished without a backend record"),
        }

        if let Err(e) = self.stats.add_completed_session(&self.profile).await {
            warn!("failed to report completed session: {}", e);
        }
        if let Err(e) = self
            .stats
            .add_focus_minutes(&self.profile, summary.actual_minutes)
            .await
        {
            warn!("failed to report focus minutes: {}", e);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
