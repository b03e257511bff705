//! Interactive controls typed on stdin while the timer runs.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::engine::Command;

/// A control the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Start,
    Pause,
    Toggle,
    Reset,
    Skip,
    Help,
    Quit,
}

impl InputCommand {
    /// Parses one input line.
    ///
    /// Accepts the single-letter shortcuts and their long names, in any
    /// case. A line of only spaces toggles. Returns `None` for an empty or
    /// unknown line.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return if line.contains(' ') {
                Some(Self::Toggle)
            } else {
                None
            };
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "s" | "start" => Some(Self::Start),
            "p" | "pause" => Some(Self::Pause),
            "t" | "toggle" => Some(Self::Toggle),
            "r" | "reset" => Some(Self::Reset),
            "n" | "next" | "skip" => Some(Self::Skip),
            "?" | "h" | "help" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Returns the service command for this control, if it has one.
    pub fn to_command(self) -> Option<Command> {
        match self {
            Self::Start => Some(Command::Start),
            Self::Pause => Some(Command::Pause),
            Self::Toggle => Some(Command::Toggle),
            Self::Reset => Some(Command::Reset),
            Self::Skip => Some(Command::Skip),
            Self::Help | Self::Quit => None,
        }
    }
}

/// Reads stdin lines on a dedicated thread.
///
/// The thread is detached so a pending read never holds up shutdown. The
/// channel closes on end of input.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_stdin_reader() -> io::Result<mpsc::UnboundedReceiver<String>> {
    let (sender, receiver) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if sender.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            debug!("Input closed");
        })?;
    Ok(receiver)
}
