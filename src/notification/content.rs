//! Notification content for completed intervals.

use crate::types::TimerMode;

/// Tag shared by every timer notification so they replace one another.
pub const NOTIFICATION_TAG: &str = "pomodoro-timer";

/// Title and body shown when an interval runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub tag: &'static str,
}

impl NotificationContent {
    /// Builds the message for the interval that just expired.
    #[must_use]
    pub fn for_completed(mode: TimerMode) -> Self {
        let body = match mode {
            TimerMode::Work => "Time for a break! ☕",
            TimerMode::ShortBreak | TimerMode::LongBreak => "Time to get back to work! 🍅",
        };
        Self {
            title: "Timer finished! ⏰".to_string(),
            body: body.to_string(),
            tag: NOTIFICATION_TAG,
        }
    }
}
