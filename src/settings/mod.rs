//! Persisted timer settings.
//!
//! Each profile owns one JSON blob at `<root>/settings/<profile>.json`
//! holding a full `TimerConfig`. Loading never fails: missing or corrupt
//! blobs silently yield the documented defaults. Saving is a full
//! overwrite; there are no partial-merge semantics.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::types::TimerConfig;

/// Application directory under the user's home.
pub const APP_DIR_NAME: &str = ".focustimer";

/// Subdirectory holding per-profile settings blobs.
const SETTINGS_DIR_NAME: &str = "settings";

// ============================================================================
// SettingsError
// ============================================================================

/// Errors that can occur when saving settings.
///
/// Only `save` surfaces errors; `load` always substitutes defaults.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error while writing the blob
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No home directory could be determined
    #[error("could not determine home directory")]
    NoHome,
}

// ============================================================================
// SettingsStore
// ============================================================================

/// File-backed settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    /// Directory holding the per-profile blobs
    root: PathBuf,
}

impl SettingsStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a store at the default location under the user's home.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_location() -> Result<Self, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHome)?;
        Ok(Self::new(home.join(APP_DIR_NAME).join(SETTINGS_DIR_NAME)))
    }

    /// Returns the blob path for a profile.
    pub fn profile_path(&self, profile: &str) -> PathBuf {
        self.root.join(format!("{}.json", profile))
    }

    /// Loads the configuration for a profile.
    ///
    /// Missing or unparseable blobs yield the defaults; no error is ever
    /// surfaced to the caller and no validation beyond JSON parse success
    /// is performed.
    pub fn load(&self, profile: &str) -> TimerConfig {
        let path = self.profile_path(profile);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("no settings for profile '{}' ({}), using defaults", profile, e);
                return TimerConfig::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "unreadable settings for profile '{}' at {} ({}), using defaults",
                    profile,
                    path.display(),
                    e
                );
                TimerConfig::default()
            }
        }
    }

    /// Saves the full configuration for a profile, overwriting any
    /// previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the blob
    /// cannot be written.
    pub fn save(&self, profile: &str, config: &TimerConfig) -> Result<(), SettingsError> {
        fs::create_dir_all(&self.root)?;

        let formatted = serde_json::to_string_pretty(config)?;
        fs::write(self.profile_path(profile), format!("{formatted}\n"))?;

        Ok(())
    }

    /// Returns the store root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// Tests
// ============================================================================
