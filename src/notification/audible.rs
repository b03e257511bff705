//! Sound notifications with a fallback chain.
//!
//! Order of attempts: the configured sound, then the synthesized tone, then
//! the terminal bell. The tone is only tried after a file error; a device
//! error would fail it just the same.

use std::io::Write;

use tracing::{debug, warn};

use super::error::NotificationError;
use super::Notifier;
use crate::sound::{SoundPlayer, SoundSource};
use crate::types::TimerMode;

/// Plays a sound for each completed interval.
#[derive(Debug)]
pub struct SoundNotifier<P> {
    player: P,
    source: SoundSource,
    bell: bool,
}

impl<P: SoundPlayer> SoundNotifier<P> {
    /// Creates a notifier that plays `source` through `player`.
    pub fn new(player: P, source: SoundSource) -> Self {
        Self {
            player,
            source,
            bell: true,
        }
    }

    /// Disables the terminal bell used as the last resort.
    #[must_use]
    pub fn without_bell(mut self) -> Self {
        self.bell = false;
        self
    }

    pub fn source(&self) -> &SoundSource {
        &self.source
    }

    fn ring_bell(&self) {
        if !self.bell {
            return;
        }
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            debug!("Terminal bell failed: {}", e);
        }
    }
}

impl<P: SoundPlayer> Notifier for SoundNotifier<P> {
    fn name(&self) -> &'static str {
        "sound"
    }

    fn notify(&self, _completed: TimerMode) -> Result<(), NotificationError> {
        let err = match self.player.play(&self.source) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        let err = if self.source.is_file() && err.should_fall_back_to_tone() {
            warn!("Could not play '{}': {}, trying tone", self.source.name(), err);
            match self.player.play(&SoundSource::fallback_tone()) {
                Ok(()) => return Ok(()),
                Err(e) => e,
            }
        } else {
            err
        };

        if err.is_device_error() {
            warn!("Audio output failed: {}, ringing terminal bell", err);
        } else {
            warn!("Sound playback failed: {}, ringing terminal bell", err);
        }
        self.ring_bell();
        Err(err.into())
    }
}
