//! User preferences persisted as JSON
//!
//! Only the theme choice survives restarts. The file lives under the
//! XDG config directory unless overridden with `MURMUR_PREFS_PATH`.

use crate::state::ThemeMode;
use crate::{MurmurError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrefs {
    pub theme: ThemeMode,
}

impl UserPrefs {
    /// Where the preferences file lives for this user
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("MURMUR_PREFS_PATH") {
            return PathBuf::from(path);
        }
        let config_base = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|_| PathBuf::from("."));
        config_base.join("murmur").join("prefs.json")
    }

    /// Load preferences, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(prefs) => {
                    debug!("Loaded preferences from {}", path.display());
                    prefs
                }
                Err(e) => {
                    warn!("Ignoring malformed preferences file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MurmurError::PersistenceError(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| MurmurError::PersistenceError(format!("Failed to encode: {}", e)))?;
        fs::write(path, raw).map_err(|e| {
            MurmurError::PersistenceError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!("Saved preferences to {}", path.display());
        Ok(())
    }
}
