//! Timer engine and its scheduler.
//!
//! - `timer`: the Pomodoro state machine
//! - `service`: tokio loop that ticks the engine and serializes commands

pub mod service;
pub mod timer;

pub use service::{Command, ServiceError, TimerEvent, TimerHandle, TimerService, TimerUpdate};
pub use timer::{CompletionCallback, TickOutcome, TimerEngine};
