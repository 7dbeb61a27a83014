//! Daemon module for the focus timer.
//!
//! This module contains the background service:
//! - `timer`: the state machine with countdown and segment transitions
//! - `ipc`: Unix socket server and request dispatch
//! - `notifier`: side-effect outbox (chime, session records, stats)
//! - `runtime`: assembly and main loop

pub mod ipc;
pub mod notifier;
pub mod runtime;
pub mod timer;

pub use ipc::{IpcServer, RequestHandler};
pub use notifier::Notifier;
pub use runtime::{default_socket_path, DaemonOptions};
pub use timer::{TimerEngine, TimerEvent, WorkSummary};
