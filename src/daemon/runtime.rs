//! Daemon assembly and main loop.
//!
//! Wires the settings store, timer engine, notifier, chime service, and
//! backend clients together, then serves IPC requests until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use crate::backend::{HttpSessionRecorder, HttpStatsReporter};
use crate::settings::{SettingsStore, APP_DIR_NAME};
use crate::sound::ChimeService;
use crate::types::TimerConfig;

use super::ipc::{IpcServer, RequestHandler, SOCKET_FILE_NAME};
use super::notifier::Notifier;
use super::timer::TimerEngine;

// ============================================================================
// DaemonOptions
// ============================================================================

/// Options for running the daemon.
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    /// Profile whose settings and sessions the daemon manages
    pub profile: String,
    /// Socket path override; defaults to `~/.focustimer/focustimer.sock`
    pub socket_path: Option<PathBuf>,
    /// Base URL of the backend API
    pub api_base: String,
}

/// Returns the default socket path under the user's home.
pub fn default_socket_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(APP_DIR_NAME).join(SOCKET_FILE_NAME))
}

// ============================================================================
// Daemon loop
// ============================================================================

/// Runs the daemon until ctrl-c.
pub async fn run(options: DaemonOptions) -> Result<()> {
    let settings = SettingsStore::default_location()?;
    let mut config = settings.load(&options.profile);

    // load() substitutes defaults for corrupt blobs but performs no
    // validation; a hand-edited zero duration is caught here instead.
    if let Err(message) = config.validate() {
        warn!(
            "stored configuration is invalid ({}), using defaults",
            message
        );
        config = TimerConfig::default();
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(Mutex::new(TimerEngine::new(config.clone(), event_tx)));

    let player = Arc::new(ChimeService::spawn(!config.sound_enabled));
    let recorder = Arc::new(HttpSessionRecorder::new(&options.api_base)?);
    let stats = Arc::new(HttpStatsReporter::new(&options.api_base)?);

    let notifier = Notifier::new(
        engine.clone(),
        event_rx,
        player,
        recorder,
        stats,
        options.profile.clone(),
    );
    let notifier_handle = tokio::spawn(notifier.run());
    let ticker_handle = tokio::spawn(TimerEngine::run(engine.clone()));

    let socket_path = match options.socket_path {
        Some(path) => path,
        None => default_socket_path()?,
    };
    let server = IpcServer::new(&socket_path)?;
    let handler = Arc::new(RequestHandler::new(engine));

    info!(
        "daemon listening on {:?} (profile '{}')",
        server.socket_path(),
        options.profile
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("received interrupt, shutting down");
                break;
            }
            accepted = server.accept() => {
                match accepted {
                    Ok(mut stream) => {
                        let handler = handler.clone();
                        tokio::spawn(async move {
                            match IpcServer::receive_request(&mut stream).await {
                                Ok(request) => {
                                    let response = handler.handle(request).await;
                                    if let Err(e) =
                                        IpcServer::send_response(&mut stream, &response).await
                                    {
                                        warn!("failed to send response: {}", e);
                                    }
                                }
                                Err(e) => warn!("failed to read request: {}", e),
                            }
                        });
                    }
                    Err(e) => warn!("failed to accept connection: {}", e),
                }
            }
        }
    }

    ticker_handle.abort();
    notifier_handle.abort();

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
