//! Core data types for the Pomodoro timer.
//!
//! This module defines the data structures used for:
//! - Timer modes and the long-break cadence
//! - Timer configuration with validation
//! - The mutable timer state and its transition rule

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest duration (in minutes) whose length in seconds still fits in a `u32`.
pub const MAX_DURATION_MINUTES: u32 = u32::MAX / 60;

// ============================================================================
// TimerMode
// ============================================================================

/// The kind of interval currently counting down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused work interval
    #[default]
    Work,
    /// Short break between work intervals
    ShortBreak,
    /// Long break after every N work intervals
    LongBreak,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Returns the emoji shown next to the label in the status line.
    pub fn emoji(&self) -> &'static str {
        match self {
            TimerMode::Work => "🍅",
            TimerMode::ShortBreak => "☕",
            TimerMode::LongBreak => "🌴",
        }
    }

    /// Returns true for either kind of break.
    pub fn is_break(&self) -> bool {
        matches!(self, TimerMode::ShortBreak | TimerMode::LongBreak)
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Reasons a configuration is rejected before it reaches the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration or the session cadence was zero.
    #[error("{field} must be at least 1 (got {value})")]
    NotPositive { field: &'static str, value: u32 },

    /// A duration does not fit in the engine's seconds counter.
    #[error("{field} is too large (got {value}, max {max})")]
    TooLarge {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

impl ConfigError {
    /// Returns the name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotPositive { field, .. } | Self::TooLarge { field, .. } => field,
        }
    }
}

// ============================================================================
// PomodoroConfig
// ============================================================================

/// Configuration for the Pomodoro timer. All durations are in minutes.
///
/// The engine treats each value as an immutable snapshot and re-derives
/// interval lengths from it on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroConfig {
    /// Work interval length in minutes
    pub work_duration: u32,
    /// Short break length in minutes
    pub short_break_duration: u32,
    /// Long break length in minutes
    pub long_break_duration: u32,
    /// Number of completed work intervals between long breaks
    pub sessions_until_long_break: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            sessions_until_long_break: 4,
        }
    }
}

impl PomodoroConfig {
    /// Creates a new configuration with the specified work duration.
    pub fn with_work_duration(mut self, minutes: u32) -> Self {
        self.work_duration = minutes;
        self
    }

    /// Creates a new configuration with the specified short break duration.
    pub fn with_short_break_duration(mut self, minutes: u32) -> Self {
        self.short_break_duration = minutes;
        self
    }

    /// Creates a new configuration with the specified long break duration.
    pub fn with_long_break_duration(mut self, minutes: u32) -> Self {
        self.long_break_duration = minutes;
        self
    }

    /// Creates a new configuration with the specified long-break cadence.
    pub fn with_sessions_until_long_break(mut self, sessions: u32) -> Self {
        self.sessions_until_long_break = sessions;
        self
    }

    /// Validates the configuration.
    ///
    /// Every value must be at least 1, and durations must be representable
    /// in seconds as a `u32`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("workDuration", self.work_duration),
            ("shortBreakDuration", self.short_break_duration),
            ("longBreakDuration", self.long_break_duration),
        ];
        for (field, value) in durations {
            if value < 1 {
                return Err(ConfigError::NotPositive { field, value });
            }
            if value > MAX_DURATION_MINUTES {
                return Err(ConfigError::TooLarge {
                    field,
                    value,
                    max: MAX_DURATION_MINUTES,
                });
            }
        }
        if self.sessions_until_long_break < 1 {
            return Err(ConfigError::NotPositive {
                field: "sessionsUntilLongBreak",
                value: self.sessions_until_long_break,
            });
        }
        Ok(())
    }

    /// Returns the configured length of `mode` in seconds.
    pub fn duration(&self, mode: TimerMode) -> u32 {
        let minutes = match mode {
            TimerMode::Work => self.work_duration,
            TimerMode::ShortBreak => self.short_break_duration,
            TimerMode::LongBreak => self.long_break_duration,
        };
        minutes.saturating_mul(60)
    }
}

// ============================================================================
// Transition
// ============================================================================

/// A mode change, either from organic completion or a skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Mode that ended
    pub from: TimerMode,
    /// Mode that is now counting down
    pub to: TimerMode,
    /// Completed work intervals after the transition
    pub sessions_completed: u32,
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
///
/// Invariants: `remaining_seconds <= interval_seconds`, and `running` is
/// false whenever `remaining_seconds == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Current mode
    pub mode: TimerMode,
    /// Seconds left in the current interval
    pub remaining_seconds: u32,
    /// Whether the countdown is advancing
    pub running: bool,
    /// Completed work intervals
    pub sessions_completed: u32,
    /// Length of the current interval, fixed when it began
    pub interval_seconds: u32,
}

impl TimerState {
    /// Creates the initial state: paused at the start of a work interval.
    pub fn new(config: &PomodoroConfig) -> Self {
        let interval_seconds = config.duration(TimerMode::Work);
        Self {
            mode: TimerMode::Work,
            remaining_seconds: interval_seconds,
            running: false,
            sessions_completed: 0,
            interval_seconds,
        }
    }

    /// Restarts the current interval from its full configured length.
    pub fn rewind(&mut self, config: &PomodoroConfig) {
        self.running = false;
        self.interval_seconds = config.duration(self.mode);
        self.remaining_seconds = self.interval_seconds;
    }

    /// Returns the mode that follows the current one.
    ///
    /// For work intervals this accounts for the session that is about to be
    /// counted.
    pub fn next_mode(&self, config: &PomodoroConfig) -> TimerMode {
        match self.mode {
            TimerMode::Work => {
                let completed = self.sessions_completed.saturating_add(1);
                if completed % config.sessions_until_long_break == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
        }
    }

    /// Applies the mode transition rule and loads the next interval.
    ///
    /// Leaves `running` untouched; callers stop the countdown first.
    pub fn advance(&mut self, config: &PomodoroConfig) -> Transition {
        let from = self.mode;
        let to = self.next_mode(config);
        if from == TimerMode::Work {
            self.sessions_completed = self.sessions_completed.saturating_add(1);
        }
        self.mode = to;
        self.interval_seconds = config.duration(to);
        self.remaining_seconds = self.interval_seconds;
        Transition {
            from,
            to,
            sessions_completed: self.sessions_completed,
        }
    }

    /// Fraction of the current interval that has elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.interval_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.interval_seconds.saturating_sub(self.remaining_seconds);
        f64::from(elapsed) / f64::from(self.interval_seconds)
    }

    /// Returns true if the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

// ============================================================================
// Tests
// ============================================================================
