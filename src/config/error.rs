//! Configuration store error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ConfigError;

/// Errors that can occur while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No configuration directory could be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// Reading or writing the document failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not valid JSON for a configuration.
    #[error("malformed configuration in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The stored values fail validation.
    #[error("invalid stored configuration: {0}")]
    Invalid(#[from] ConfigError),
}

impl StoreError {
    /// Returns true if the stored document exists but cannot be used.
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Invalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Io {
            path: PathBuf::from("/x/config.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to access /x/config.json: denied");
    }

    #[test]
    fn test_is_corrupt() {
        let invalid = StoreError::Invalid(ConfigError::NotPositive {
            field: "workDuration",
            value: 0,
        });
        assert!(invalid.is_corrupt());
        assert!(!StoreError::NoConfigDir.is_corrupt());
    }
}
