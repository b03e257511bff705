//! Notification system error types.

use thiserror::Error;

use crate::sound::SoundError;

/// Errors that can occur while announcing a completed interval.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The desktop notification could not be delivered.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// Neither the configured sound nor the fallback tone could be played.
    #[error("sound notification failed: {0}")]
    Sound(#[from] SoundError),
}
