//! CLI module for tomato.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Interactive controls read from stdin
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, ConfigAction, DurationArgs, RunArgs};
pub use display::Display;
pub use input::{spawn_stdin_reader, InputCommand};
