//! Desktop notifications via `notify-rust`.

use notify_rust::Notification;
use tracing::debug;

use super::content::NotificationContent;
use super::error::NotificationError;
use super::Notifier;
use crate::types::TimerMode;

/// Application name reported to the notification server.
const APP_NAME: &str = "tomato";

/// Shows a desktop notification for each completed interval.
///
/// Notifications stay on screen until dismissed.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn notify(&self, completed: TimerMode) -> Result<(), NotificationError> {
        let content = NotificationContent::for_completed(completed);

        Notification::new()
            .appname(APP_NAME)
            .summary(&content.title)
            .body(&content.body)
            .timeout(0) // No auto-dismiss
            .show()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        debug!(tag = content.tag, "Desktop notification sent");
        Ok(())
    }
}
