//! Display utilities for the focus timer CLI.
//!
//! Two read-only views over the daemon's state: a full status panel and a
//! compact one-line readout suitable for prompts and status bars. Both
//! render IPC snapshots; neither holds timer state of its own.

use crate::types::{IpcResponse, ResponseData, TimerConfig};

/// Width of the status panel progress bar.
const PROGRESS_WIDTH: usize = 30;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a success message for timer start.
    pub fn show_start_success(response: &IpcResponse) {
        println!("> {}", response.message);
        if let Some(data) = &response.data {
            Self::print_segment_line(data);
        }
    }

    /// Shows a success message for timer pause.
    pub fn show_pause_success(response: &IpcResponse) {
        println!("|| {}", response.message);
        if let Some(data) = &response.data {
            Self::print_segment_line(data);
        }
    }

    /// Shows a success message for segment reset.
    pub fn show_reset_success(response: &IpcResponse) {
        println!("[] {}", response.message);
        if let Some(data) = &response.data {
            Self::print_segment_line(data);
        }
    }

    /// Shows a logged distraction.
    pub fn show_distraction(response: &IpcResponse) {
        println!("! {}", response.message);
    }

    /// Shows the full status panel (the floating view).
    pub fn show_status(response: &IpcResponse) {
        println!("Focus Timer");
        println!("------------------------------");

        let Some(data) = &response.data else {
            println!("no status available");
            return;
        };

        let state = data.state.as_deref().unwrap_or("unknown");
        println!("State:        {}", state);
        println!(
            "Segment:      {}",
            Self::session_label(data.session.as_deref().unwrap_or("unknown"))
        );

        if let (Some(remaining), Some(total)) = (data.remaining_seconds, data.total_seconds) {
            let (minutes, seconds) = Self::format_time(remaining);
            println!("Remaining:    {}:{:02}", minutes, seconds);
            println!("{}", Self::progress_bar(remaining, total));
        }

        if let Some(sessions) = data.sessions_completed {
            println!("Sessions:     {} completed", sessions);
        }
        if let Some(distractions) = data.distraction_count {
            println!("Distractions: {}", distractions);
        }
    }

    /// Shows the compact one-line readout (the navbar view).
    pub fn show_status_compact(response: &IpcResponse) {
        let Some(data) = &response.data else {
            println!("focustimer: no status");
            return;
        };

        let marker = Self::state_marker(data.state.as_deref().unwrap_or("unknown"));
        let session = data.session.as_deref().unwrap_or("?");
        let (minutes, seconds) = Self::format_time(data.remaining_seconds.unwrap_or(0));
        let sessions = data.sessions_completed.unwrap_or(0);

        println!(
            "{} {} {}:{:02} ({} done)",
            marker, session, minutes, seconds, sessions
        );
    }

    /// Shows the stored configuration for a profile.
    pub fn show_config(profile: &str, config: &TimerConfig) {
        println!("Configuration for '{}'", profile);
        println!("------------------------------");
        println!("Work:                    {} min", config.work_minutes);
        println!("Short break:             {} min", config.short_break_minutes);
        println!("Long break:              {} min", config.long_break_minutes);
        println!(
            "Sessions until long break: {}",
            config.sessions_until_long_break
        );
        println!("Auto-start breaks:       {}", config.auto_start_breaks);
        println!("Auto-start work:         {}", config.auto_start_work);
        println!("Sound:                   {}", config.sound_enabled);
    }

    /// Shows the outcome of a settings save.
    pub fn show_config_saved(applied: bool, note: Option<&str>) {
        if applied {
            println!("* configuration saved and applied");
        } else {
            println!("* configuration saved");
        }
        if let Some(note) = note {
            println!("  note: {}", note);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Prints the segment and remaining-time line shared by command output.
    fn print_segment_line(data: &ResponseData) {
        if let Some(session) = &data.session {
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!(
                    "  {} - {}:{:02} remaining",
                    Self::session_label(session),
                    minutes,
                    seconds
                );
            }
        }
    }

    /// Splits seconds into (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        (total_seconds / 60, total_seconds % 60)
    }

    /// Maps a session kind string to a human label.
    fn session_label(kind: &str) -> &str {
        match kind {
            "work" => "Work",
            "short_break" => "Short break",
            "long_break" => "Long break",
            other => other,
        }
    }

    /// Maps a run state to the compact readout marker.
    fn state_marker(state: &str) -> &'static str {
        match state {
            "running" => ">",
            "paused" => "||",
            _ => "o",
        }
    }

    /// Renders the elapsed portion of the segment as a bar.
    fn progress_bar(remaining: u32, total: u32) -> String {
        if total == 0 {
            return format!("[{}]", "-".repeat(PROGRESS_WIDTH));
        }

        let elapsed = total.saturating_sub(remaining) as usize;
        let filled = (elapsed * PROGRESS_WIDTH) / total as usize;
        let filled = filled.min(PROGRESS_WIDTH);

        format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
