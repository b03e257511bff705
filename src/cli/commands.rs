//! Command definitions for the tomato CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::PomodoroConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// tomato - A Pomodoro timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "tomato",
    version,
    about = "A Pomodoro timer for the terminal",
    long_about = "Alternates focus intervals with short and long breaks.\n\
                  Runs in the foreground and announces each finished interval \
                  with a desktop notification and a sound.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this configuration file instead of the default location
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer in the foreground
    Run(RunArgs),

    /// Manage the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Actions of the `config` subcommand
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the stored configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Remove the stored configuration and return to the defaults
    Reset,

    /// Change one or more stored values
    Set(DurationArgs),
}

// ============================================================================
// Duration Arguments
// ============================================================================

/// Overrides for the four configuration values.
///
/// Values outside the settings ranges are rejected at parse time.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationArgs {
    /// Focus duration in minutes (1-60)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub work: Option<u32>,

    /// Short break duration in minutes (1-30)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=30))]
    pub short_break: Option<u32>,

    /// Long break duration in minutes (1-60)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub long_break: Option<u32>,

    /// Focus sessions before a long break (1-10)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub sessions: Option<u32>,
}

impl DurationArgs {
    /// Returns true if no value was given.
    pub fn is_empty(&self) -> bool {
        self.work.is_none()
            && self.short_break.is_none()
            && self.long_break.is_none()
            && self.sessions.is_none()
    }

    /// Applies the given values on top of `base`.
    #[must_use]
    pub fn apply(&self, base: PomodoroConfig) -> PomodoroConfig {
        let mut config = base;
        if let Some(work) = self.work {
            config = config.with_work_duration(work);
        }
        if let Some(short_break) = self.short_break {
            config = config.with_short_break_duration(short_break);
        }
        if let Some(long_break) = self.long_break {
            config = config.with_long_break_duration(long_break);
        }
        if let Some(sessions) = self.sessions {
            config = config.with_sessions_until_long_break(sessions);
        }
        config
    }
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub durations: DurationArgs,

    /// Audio file to play when an interval finishes
    #[arg(long, value_name = "FILE", conflicts_with = "no_sound")]
    pub sound: Option<PathBuf>,

    /// Disable notification sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Start the first focus interval immediately
    #[arg(short, long)]
    pub autostart: bool,
}

// ============================================================================
// Tests
// ============================================================================
