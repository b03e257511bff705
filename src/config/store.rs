//! Persistence backends for the configuration snapshot.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::error::StoreError;
use super::ConfigStore;
use crate::types::PomodoroConfig;

/// Directory name under the platform config directory.
const APP_DIR: &str = "tomato";

/// File name of the stored document.
const CONFIG_FILE: &str = "config.json";

/// Returns the default document path, e.g. `~/.config/tomato/config.json`.
///
/// # Errors
///
/// Returns `StoreError::NoConfigDir` if the platform has no config directory.
pub fn default_config_path() -> Result<PathBuf, StoreError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or(StoreError::NoConfigDir)
}

// ============================================================================
// JsonFileStore
// ============================================================================

/// Stores the configuration as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self::with_path(default_config_path()?))
    }

    /// Creates a store backed by an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> Result<Option<PomodoroConfig>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored configuration");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let config: PomodoroConfig =
            serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        config.validate()?;

        debug!(path = %self.path.display(), "Configuration loaded");
        Ok(Some(config))
    }

    fn save(&self, config: &PomodoroConfig) -> Result<(), StoreError> {
        config.validate()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut text = serde_json::to_string_pretty(config).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        text.push('\n');
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Keeps the configuration in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<PomodoroConfig>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `config`.
    #[must_use]
    pub fn with_config(config: PomodoroConfig) -> Self {
        Self {
            value: Mutex::new(Some(config)),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Option<PomodoroConfig>, StoreError> {
        Ok(self.value.lock().map(|v| *v).unwrap_or(None))
    }

    fn save(&self, config: &PomodoroConfig) -> Result<(), StoreError> {
        config.validate()?;
        if let Ok(mut value) = self.value.lock() {
            *value = Some(*config);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if let Ok(mut value) = self.value.lock() {
            *value = None;
        }
        Ok(())
    }
}
