//! Timer engine for the Pomodoro timer.
//!
//! This module provides the core state machine:
//! - Mode transitions (Work → ShortBreak | LongBreak → Work)
//! - One-second countdown steps driven by an external scheduler
//! - A completion callback for organic (non-skip) expiry
//!
//! The engine performs no I/O and owns no clock. A scheduler calls
//! [`TimerEngine::tick`] once per elapsed second while the timer runs.

use std::fmt;

use tracing::debug;

use crate::types::{ConfigError, PomodoroConfig, TimerMode, TimerState, Transition};

/// Callback invoked once per organic completion, with the mode that expired.
pub type CompletionCallback = Box<dyn FnMut(TimerMode) + Send>;

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of a single [`TimerEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Idle,
    /// One second elapsed and the interval is still counting down.
    Counting {
        /// Seconds left after this tick
        remaining_seconds: u32,
    },
    /// The interval expired and the engine moved to the next mode.
    Completed(Transition),
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Pomodoro state machine.
pub struct TimerEngine {
    /// Configuration snapshot used for the next interval
    config: PomodoroConfig,
    /// Current timer state
    state: TimerState,
    /// Organic completion hook
    on_complete: Option<CompletionCallback>,
}

impl TimerEngine {
    /// Creates a new engine paused at the start of a work interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: PomodoroConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: TimerState::new(&config),
            config,
            on_complete: None,
        })
    }

    /// Installs the completion callback, builder style.
    #[must_use]
    pub fn with_on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut(TimerMode) + Send + 'static,
    {
        self.set_on_complete(callback);
        self
    }

    /// Installs or replaces the completion callback.
    pub fn set_on_complete<F>(&mut self, callback: F)
    where
        F: FnMut(TimerMode) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Starts the countdown. No-op when nothing is left to count.
    pub fn start(&mut self) {
        if self.state.remaining_seconds > 0 {
            self.state.running = true;
        }
    }

    /// Stops the countdown, keeping the remaining time.
    pub fn pause(&mut self) {
        self.state.running = false;
    }

    /// Stops the countdown and restores the full length of the current mode.
    ///
    /// Mode and session count are preserved. The length comes from the
    /// latest configuration, so this is how a new duration reaches the
    /// current interval.
    pub fn reset(&mut self) {
        self.state.rewind(&self.config);
    }

    /// Stops the countdown and moves straight to the next mode.
    ///
    /// Uses the same rule as organic completion but never invokes the
    /// completion callback.
    pub fn skip(&mut self) -> Transition {
        self.state.running = false;
        let transition = self.state.advance(&self.config);
        debug!(from = ?transition.from, to = ?transition.to, "Interval skipped");
        transition
    }

    /// Advances the countdown by one second.
    ///
    /// When the last second elapses the engine stops, invokes the completion
    /// callback and then transitions to the next mode.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running || self.state.remaining_seconds == 0 {
            return TickOutcome::Idle;
        }

        if self.state.remaining_seconds > 1 {
            self.state.remaining_seconds -= 1;
            return TickOutcome::Counting {
                remaining_seconds: self.state.remaining_seconds,
            };
        }

        self.state.remaining_seconds = 0;
        self.state.running = false;

        let expired = self.state.mode;
        if let Some(callback) = self.on_complete.as_mut() {
            callback(expired);
        }

        let transition = self.state.advance(&self.config);
        debug!(
            from = ?transition.from,
            to = ?transition.to,
            sessions = transition.sessions_completed,
            "Interval completed"
        );
        TickOutcome::Completed(transition)
    }

    /// Fraction of the current interval that has elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    /// Replaces the configuration snapshot.
    ///
    /// The running interval keeps its length; the new durations apply from
    /// the next transition or [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// Returns an error and keeps the previous configuration if the new one
    /// is invalid.
    pub fn reconfigure(&mut self, config: PomodoroConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the active configuration snapshot.
    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    /// Returns the current mode.
    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    /// Returns the seconds left in the current interval.
    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Returns true while the countdown is active.
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Returns the number of focus intervals finished so far.
    pub fn sessions_completed(&self) -> u32 {
        self.state.sessions_completed
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

impl fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
