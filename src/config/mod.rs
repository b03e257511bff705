//! Persistence of the timer configuration.
//!
//! The engine never touches storage. Hosts load a [`PomodoroConfig`]
//! snapshot through a [`ConfigStore`] and hand it to the engine.
//!
//! # Example
//!
//! ```rust
//! use tomato_timer::config::{load_or_default, ConfigStore, MemoryStore};
//! use tomato_timer::types::PomodoroConfig;
//!
//! let store = MemoryStore::new();
//! assert_eq!(load_or_default(&store), PomodoroConfig::default());
//!
//! let custom = PomodoroConfig::default().with_work_duration(50);
//! store.save(&custom).unwrap();
//! assert_eq!(load_or_default(&store), custom);
//! ```

mod error;
mod store;

use tracing::warn;

use crate::types::PomodoroConfig;

pub use error::StoreError;
pub use store::{default_config_path, JsonFileStore, MemoryStore};

/// Load/save surface for the single configuration object.
pub trait ConfigStore {
    /// Returns the stored configuration, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be read or is invalid.
    fn load(&self) -> Result<Option<PomodoroConfig>, StoreError>;

    /// Replaces the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or cannot be written.
    fn save(&self, config: &PomodoroConfig) -> Result<(), StoreError>;

    /// Removes the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be removed.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Loads the stored configuration, falling back to the defaults.
///
/// A missing document is silent; an unreadable or invalid one is logged.
pub fn load_or_default<S: ConfigStore + ?Sized>(store: &S) -> PomodoroConfig {
    match store.load() {
        Ok(Some(config)) => config,
        Ok(None) => PomodoroConfig::default(),
        Err(e) => {
            warn!("Using default configuration: {}", e);
            PomodoroConfig::default()
        }
    }
}
