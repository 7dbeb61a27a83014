//! Timer engine for the focus timer daemon.
//!
//! This module provides the core state machine:
//! - Segment transitions (work → short/long break → work)
//! - Countdown with tokio::time::interval
//! - Event emission for the notifier (chime, session records, stats)
//! - Auto-start of breaks and work segments
//! - Long break cadence based on completed work segments

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

use crate::types::{SessionKind, TimerConfig, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Summary of a completed work segment, emitted for backend bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSummary {
    /// Backend record id, if the create call had succeeded by completion time
    pub record_id: Option<String>,
    /// Wall-clock start of the segment
    pub started_at: DateTime<Utc>,
    /// Wall-clock end of the segment
    pub ended_at: DateTime<Utc>,
    /// Configured duration in minutes
    pub planned_minutes: u32,
    /// Wall-clock elapsed minutes, including any paused stretches
    pub actual_minutes: u32,
    /// Distractions accumulated during the segment
    pub distraction_count: u32,
    /// Total completed work segments including this one
    pub sessions_completed: u32,
}

/// Timer events consumed by the notifier and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A work segment started for the first time (not a resume)
    WorkStarted {
        /// Segment epoch; echoed back when attaching the created record
        epoch: u64,
        /// Configured duration in minutes
        planned_minutes: u32,
        /// Wall-clock start
        started_at: DateTime<Utc>,
    },
    /// A work segment ran to completion
    WorkCompleted(WorkSummary),
    /// A break segment started for the first time
    BreakStarted {
        /// Whether this is a long break
        long: bool,
    },
    /// A break segment ran to completion
    BreakCompleted {
        /// Whether this was a long break
        long: bool,
    },
    /// Countdown paused
    Paused,
    /// Countdown resumed mid-segment
    Resumed,
    /// Current segment reset to its full duration
    Reset,
    /// A distraction was logged
    DistractionLogged {
        /// Running count for the current work stretch
        count: u32,
    },
    /// Configuration was replaced
    Configured {
        /// New chime flag, for the notifier's player
        sound_enabled: bool,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// The timer state machine.
///
/// Owns the single authoritative `TimerState`; all mutation goes through
/// the operations below. Side effects are emitted as events on an unbounded
/// channel, so no operation ever waits on audio or network.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new engine with the given configuration and event channel.
    pub fn new(config: TimerConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(config),
            event_tx,
        }
    }

    /// Runs the 1 Hz tick loop until the task is cancelled.
    ///
    /// This is the only tick driver; pausing makes `tick` a no-op rather
    /// than re-registering timers, so double-decrementing is impossible.
    pub async fn run(engine: Arc<Mutex<TimerEngine>>) -> Result<()> {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            engine.lock().await.tick()?;
        }
    }

    /// Advances the countdown by one second.
    ///
    /// No-op unless running. When the segment reaches zero, completion
    /// side effects fire and the next segment is loaded.
    pub fn tick(&mut self) -> Result<()> {
        if !self.state.running {
            return Ok(());
        }

        let completed = self.state.tick();

        self.event_tx
            .send(TimerEvent::Tick {
                remaining_seconds: self.state.remaining_seconds,
            })
            .context("failed to send tick event")?;

        if completed {
            self.complete_segment()?;
        }

        Ok(())
    }

    /// Starts or resumes the countdown.
    ///
    /// The first start of a work segment emits `WorkStarted` exactly once;
    /// starting again after a pause resumes without a second record create.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer is already running.
    pub fn start(&mut self) -> Result<()> {
        if self.state.running {
            anyhow::bail!("timer is already running");
        }
        self.start_segment()
    }

    /// Pauses the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer is not running.
    pub fn pause(&mut self) -> Result<()> {
        if !self.state.running {
            anyhow::bail!("timer is not running");
        }

        self.state.running = false;

        self.event_tx
            .send(TimerEvent::Paused)
            .context("failed to send paused event")?;

        Ok(())
    }

    /// Resets the current segment to its full duration.
    ///
    /// Implies a pause. The active record id is kept: a reset segment is
    /// still the same work attempt, and its record is completed with true
    /// wall-clock elapsed whenever the segment eventually finishes.
    pub fn reset(&mut self) -> Result<()> {
        self.state.running = false;
        self.state.remaining_seconds = self.state.total_seconds;

        self.event_tx
            .send(TimerEvent::Reset)
            .context("failed to send reset event")?;

        Ok(())
    }

    /// Logs a distraction during the current work stretch.
    pub fn log_distraction(&mut self) -> Result<u32> {
        self.state.distraction_count += 1;
        let count = self.state.distraction_count;

        self.event_tx
            .send(TimerEvent::DistractionLogged { count })
            .context("failed to send distraction event")?;

        Ok(count)
    }

    /// Replaces the timer configuration.
    ///
    /// Only callable while the countdown is halted. New durations apply to
    /// the current segment only if it has not begun; a paused, partially
    /// elapsed segment keeps its remaining time.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer is running or the configuration is
    /// invalid; the previous configuration is retained on failure.
    pub fn configure(&mut self, config: TimerConfig) -> Result<()> {
        if self.state.running {
            anyhow::bail!("cannot change configuration while the timer is running");
        }
        if let Err(message) = config.validate() {
            anyhow::bail!(message);
        }

        let sound_enabled = config.sound_enabled;
        self.state.config = config;

        if !self.state.has_begun() {
            let total = self.state.config.duration_seconds(self.state.kind);
            self.state.total_seconds = total;
            self.state.remaining_seconds = total;
        }

        self.event_tx
            .send(TimerEvent::Configured { sound_enabled })
            .context("failed to send configured event")?;

        Ok(())
    }

    /// Attaches the backend record id created for a work segment.
    ///
    /// Ignored when the segment has moved on since the create was issued,
    /// keeping the invariant that the id always refers to the current
    /// work segment.
    pub fn attach_record(&mut self, epoch: u64, record_id: String) {
        if self.state.segment_epoch == epoch
            && self.state.kind == SessionKind::Work
            && self.state.active_record_id.is_none()
        {
            self.state.active_record_id = Some(record_id);
        } else {
            debug!("ignoring stale session record id {}", record_id);
        }
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    /// Starts the current segment, emitting the appropriate event.
    fn start_segment(&mut self) -> Result<()> {
        let fresh = !self.state.has_begun();
        self.state.running = true;

        if !fresh {
            self.event_tx
                .send(TimerEvent::Resumed)
                .context("failed to send resumed event")?;
            return Ok(());
        }

        let now = Utc::now();
        self.state.started_at = Some(now);

        match self.state.kind {
            SessionKind::Work => {
                self.state.record_requested = true;
                self.event_tx
                    .send(TimerEvent::WorkStarted {
                        epoch: self.state.segment_epoch,
                        planned_minutes: self.state.total_seconds / 60,
                        started_at: now,
                    })
                    .context("failed to send work started event")?;
            }
            kind => {
                self.event_tx
                    .send(TimerEvent::BreakStarted {
                        long: kind == SessionKind::LongBreak,
                    })
                    .context("failed to send break started event")?;
            }
        }

        Ok(())
    }

    /// Handles segment completion: side effects, next kind, auto-start.
    fn complete_segment(&mut self) -> Result<()> {
        self.state.running = false;

        match self.state.kind {
            SessionKind::Work => {
                self.state.sessions_completed += 1;

                let ended_at = Utc::now();
                let started_at = self.state.started_at.unwrap_or(ended_at);
                let elapsed = ended_at.signed_duration_since(started_at);
                let actual_minutes = elapsed.num_minutes().clamp(0, i64::from(u32::MAX)) as u32;

                let summary = WorkSummary {
                    record_id: self.state.active_record_id.take(),
                    started_at,
                    ended_at,
                    planned_minutes: self.state.total_seconds / 60,
                    actual_minutes,
                    distraction_count: self.state.distraction_count,
                    sessions_completed: self.state.sessions_completed,
                };

                self.event_tx
                    .send(TimerEvent::WorkCompleted(summary))
                    .context("failed to send work completed event")?;

                // Long break every `sessions_until_long_break` completions
                let next = if self.state.sessions_completed
                    % self.state.config.sessions_until_long_break
                    == 0
                {
                    SessionKind::LongBreak
                } else {
                    SessionKind::ShortBreak
                };
                self.state.begin_segment(next);

                if self.state.config.auto_start_breaks {
                    self.start_segment()?;
                }
            }
            kind => {
                self.event_tx
                    .send(TimerEvent::BreakCompleted {
                        long: kind == SessionKind::LongBreak,
                    })
                    .context("failed to send break completed event")?;

                // Distractions reset only when leaving a break into work
                self.state.distraction_count = 0;
                self.state.begin_segment(SessionKind::Work);

                if self.state.config.auto_start_work {
                    self.start_segment()?;
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
