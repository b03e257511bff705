//! Sound source management.
//!
//! A completion sound is either an audio file chosen by the user or a
//! synthesized tone. The tone doubles as the fallback when a file cannot be
//! played.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Frequency of the fallback tone in Hz.
pub const FALLBACK_TONE_HZ: u32 = 800;

/// Length of the fallback tone in milliseconds.
pub const FALLBACK_TONE_MS: u64 = 200;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "aiff"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Full path to the file.
        path: PathBuf,
    },
    /// A synthesized sine tone.
    Tone {
        /// Frequency in Hz.
        frequency_hz: u32,
        /// Length in milliseconds.
        duration_ms: u64,
    },
}

impl SoundSource {
    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// Creates a file source after checking that the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` if the path is not a file, or
    /// `SoundError::UnsupportedFormat` for unknown extensions.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        if !is_supported_file(&path) {
            return Err(SoundError::UnsupportedFormat(path.display().to_string()));
        }
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        Ok(Self::file(path))
    }

    /// The short beep used when nothing else can be played.
    #[must_use]
    pub fn fallback_tone() -> Self {
        Self::Tone {
            frequency_hz: FALLBACK_TONE_HZ,
            duration_ms: FALLBACK_TONE_MS,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Tone { .. } => "tone",
        }
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

impl Default for SoundSource {
    fn default() -> Self {
        Self::fallback_tone()
    }
}

/// Returns true if the path has an extension the decoder understands.
fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
