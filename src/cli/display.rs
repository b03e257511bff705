//! Display utilities for the tomato CLI.
//!
//! This module provides formatted output for:
//! - The live status line
//! - Timer events
//! - Configuration display
//! - Error messages

use std::io::{self, Write};
use std::path::Path;

use crate::engine::{TimerEvent, TimerUpdate};
use crate::notification::NotificationContent;
use crate::types::{PomodoroConfig, TimerState};

/// Width of the progress bar in the status line, in cells.
const BAR_WIDTH: usize = 20;

/// Carriage return plus "erase line", used to redraw the status line.
const REDRAW: &str = "\r\x1b[2K";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the banner printed when the timer starts up.
    pub fn show_welcome(config: &PomodoroConfig) {
        println!(
            "🍅 tomato · focus {}m · short break {}m · long break {}m every {} sessions",
            config.work_duration,
            config.short_break_duration,
            config.long_break_duration,
            config.sessions_until_long_break
        );
        println!("Type ? and Enter for controls.");
    }

    /// Shows the list of interactive controls.
    pub fn show_controls() {
        println!("{}Controls (type a letter, then Enter):", REDRAW);
        println!("  s      start");
        println!("  p      pause");
        println!("  t      start or pause (a blank line with a space works too)");
        println!("  r      reset the current interval");
        println!("  n      skip to the next interval");
        println!("  q      quit");
        println!("  ?      show this help");
    }

    /// Redraws the status line for the given state.
    pub fn show_status(state: &TimerState) {
        print!("{}{}", REDRAW, Self::status_line(state));
        let _ = io::stdout().flush();
    }

    /// Shows a timer update.
    ///
    /// Events worth remembering are printed on their own line; the status
    /// line is redrawn below them.
    pub fn show_update(update: &TimerUpdate) {
        if let Some(message) = Self::event_message(&update.event) {
            println!("{}{}", REDRAW, message);
        }
        Self::show_status(&update.state);
    }

    /// Shows an input line that is not a control.
    pub fn show_unknown_input(line: &str) {
        println!("{}Unknown command '{}'. Type ? for help.", REDRAW, line.trim());
    }

    /// Shows the final summary when the timer exits.
    pub fn show_goodbye(state: &TimerState) {
        println!(
            "{}Stopped after {}. Bye!",
            REDRAW,
            Self::sessions_text(state.sessions_completed)
        );
    }

    /// Shows a configuration and where it is stored.
    pub fn show_config(config: &PomodoroConfig, path: &Path) {
        println!("Configuration ({})", path.display());
        println!("─────────────────────────────");
        println!("Focus:          {} min", config.work_duration);
        println!("Short break:    {} min", config.short_break_duration);
        println!("Long break:     {} min", config.long_break_duration);
        println!("Long break every {} sessions", config.sessions_until_long_break);
    }

    /// Shows a success message after saving the configuration.
    pub fn show_config_saved(config: &PomodoroConfig, path: &Path) {
        println!("* Configuration saved");
        Self::show_config(config, path);
    }

    /// Shows a success message after removing the stored configuration.
    pub fn show_config_reset(path: &Path) {
        println!("* Configuration reset to defaults");
        Self::show_config(&PomodoroConfig::default(), path);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Builds the status line, e.g. `🍅 Focus 24:59 [#---] 4% · 0 sessions`.
    pub fn status_line(state: &TimerState) -> String {
        let progress = state.progress();
        let mut line = format!(
            "{} {} {} {} {}% · {}",
            state.mode.emoji(),
            state.mode.label(),
            Self::format_clock(state.remaining_seconds),
            Self::progress_bar(progress, BAR_WIDTH),
            (progress * 100.0).floor() as u32,
            Self::sessions_text(state.sessions_completed),
        );
        if !state.running {
            line.push_str(" · paused");
        }
        line
    }

    /// Returns the message for an event, or `None` for routine ones.
    pub fn event_message(event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::Started | TimerEvent::Paused | TimerEvent::Tick { .. } => None,
            TimerEvent::Reset => Some("↺ Interval reset".to_string()),
            TimerEvent::Skipped(transition) => Some(format!(
                "⏭ Skipped {} → {}",
                transition.from.label(),
                transition.to.label()
            )),
            TimerEvent::Completed(transition) => {
                let content = NotificationContent::for_completed(transition.from);
                Some(format!("⏰ {} finished! {}", transition.from.label(), content.body))
            }
            TimerEvent::Reconfigured(_) => {
                Some("* Configuration updated; it applies from the next interval".to_string())
            }
            TimerEvent::ConfigRejected(e) => Some(format!("Configuration rejected: {}", e)),
        }
    }

    /// Formats seconds as `mm:ss`; minutes are not capped at 99.
    pub fn format_clock(total_seconds: u32) -> String {
        format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
    }

    /// Renders `progress` (0.0 to 1.0) as a bar of `width` cells.
    pub fn progress_bar(progress: f64, width: usize) -> String {
        let filled = ((progress.clamp(0.0, 1.0) * width as f64).floor() as usize).min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }

    fn sessions_text(count: u32) -> String {
        if count == 1 {
            "1 session".to_string()
        } else {
            format!("{} sessions", count)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TimerMode, Transition};

    fn state(mode: TimerMode, remaining: u32, interval: u32, running: bool) -> TimerState {
        TimerState {
            mode,
            remaining_seconds: remaining,
            running,
            sessions_completed: 0,
            interval_seconds: interval,
        }
    }

    // ------------------------------------------------------------------------
    // Format Clock Tests
    // ------------------------------------------------------------------------

    mod format_clock_tests {
        use super::*;

        #[test]
        fn test_format_clock_zero() {
            assert_eq!(Display::format_clock(0), "00:00");
        }

        #[test]
        fn test_format_clock_seconds_only() {
            assert_eq!(Display::format_clock(45), "00:45");
        }

        #[test]
        fn test_format_clock_25_minutes() {
            assert_eq!(Display::format_clock(25 * 60), "25:00");
            assert_eq!(Display::format_clock(25 * 60 - 1), "24:59");
        }

        #[test]
        fn test_format_clock_large() {
            assert_eq!(Display::format_clock(120 * 60 + 59), "120:59");
        }
    }

    // ------------------------------------------------------------------------
    // Progress Bar Tests
    // ------------------------------------------------------------------------

    mod progress_bar_tests {
        use super::*;

        #[test]
        fn test_empty_and_full() {
            assert_eq!(Display::progress_bar(0.0, 4), "[----]");
            assert_eq!(Display::progress_bar(1.0, 4), "[####]");
        }

        #[test]
        fn test_partial_rounds_down() {
            assert_eq!(Display::progress_bar(0.5, 8), "[####----]");
            assert_eq!(Display::progress_bar(0.99, 4), "[###-]");
        }

        #[test]
        fn test_out_of_range_is_clamped() {
            assert_eq!(Display::progress_bar(-1.0, 2), "[--]");
            assert_eq!(Display::progress_bar(2.0, 2), "[##]");
        }
    }

    // ------------------------------------------------------------------------
    // Status Line Tests
    // ------------------------------------------------------------------------

    mod status_line_tests {
        use super::*;

        #[test]
        fn test_running_focus() {
            let line = Display::status_line(&state(TimerMode::Work, 1499, 1500, true));
            assert_eq!(
                line,
                format!("🍅 Focus 24:59 [{}] 0% · 0 sessions", "-".repeat(BAR_WIDTH))
            );
        }

        #[test]
        fn test_paused_break_half_done() {
            let mut s = state(TimerMode::ShortBreak, 150, 300, false);
            s.sessions_completed = 1;
            let line = Display::status_line(&s);
            assert!(line.starts_with("☕ Short Break 02:30 [##########----------] 50%"));
            assert!(line.ends_with("· 1 session · paused"));
        }
    }

    // ------------------------------------------------------------------------
    // Event Message Tests
    // ------------------------------------------------------------------------

    mod event_message_tests {
        use super::*;

        #[test]
        fn test_routine_events_are_silent() {
            assert!(Display::event_message(&TimerEvent::Started).is_none());
            assert!(Display::event_message(&TimerEvent::Tick {
                remaining_seconds: 10
            })
            .is_none());
        }

        #[test]
        fn test_completed_focus_suggests_break() {
            let event = TimerEvent::Completed(Transition {
                from: TimerMode::Work,
                to: TimerMode::ShortBreak,
                sessions_completed: 1,
            });
            let message = Display::event_message(&event).unwrap();
            assert!(message.starts_with("⏰ Focus finished!"));
            assert!(message.contains("break"));
        }

        #[test]
        fn test_skipped_names_both_modes() {
            let event = TimerEvent::Skipped(Transition {
                from: TimerMode::LongBreak,
                to: TimerMode::Work,
                sessions_completed: 4,
            });
            assert_eq!(
                Display::event_message(&event).unwrap(),
                "⏭ Skipped Long Break → Focus"
            );
        }
    }

    mod output_tests {
        use super::*;

        #[test]
        fn test_show_functions_do_not_panic() {
            let config = PomodoroConfig::default();
            Display::show_welcome(&config);
            Display::show_controls();
            Display::show_config(&config, Path::new("/tmp/config.json"));
            Display::show_update(&TimerUpdate {
                event: TimerEvent::Reset,
                state: state(TimerMode::Work, 1500, 1500, false),
            });
            Display::show_error("Test error message");
        }
    }
}
