//! tomato timer library
//!
//! This library provides the core functionality for the tomato CLI.
//! It includes:
//! - A tick-driven Pomodoro timer engine and its tokio scheduler
//! - Configuration types and their JSON persistence
//! - Desktop and sound notifications for completed intervals
//! - CLI command parsing and display utilities

pub mod cli;
pub mod config;
pub mod engine;
pub mod notification;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, PomodoroConfig, TimerMode, TimerState, Transition};

pub use engine::{Command, TickOutcome, TimerEngine, TimerEvent, TimerHandle, TimerService};

pub use config::{load_or_default, ConfigStore, JsonFileStore, MemoryStore, StoreError};

pub use notification::{
    CompletionDispatcher, DesktopNotifier, MockNotifier, NotificationError, Notifier, NotifierSet,
    SoundNotifier,
};

pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};
