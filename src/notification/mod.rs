//! Completion notifications.
//!
//! This module turns the engine's completion callback into user-visible
//! effects. It includes:
//!
//! - The [`Notifier`] capability and a fan-out [`NotifierSet`]
//! - Desktop notifications (`notify-rust`)
//! - Sound notifications with a tone and terminal-bell fallback
//! - A [`CompletionDispatcher`] thread so slow notifiers never block ticks
//!
//! Failures are logged and swallowed here; they never reach the engine.
//!
//! # Example
//!
//! ```rust,no_run
//! use tomato_timer::engine::TimerEngine;
//! use tomato_timer::notification::{CompletionDispatcher, DesktopNotifier};
//! use tomato_timer::types::PomodoroConfig;
//!
//! let dispatcher = CompletionDispatcher::spawn(DesktopNotifier::new).expect("spawn thread");
//! let engine = TimerEngine::new(PomodoroConfig::default())
//!     .expect("valid config")
//!     .with_on_complete(dispatcher.callback());
//! ```

mod audible;
mod content;
mod desktop;
mod dispatcher;
pub mod error;

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::types::TimerMode;

pub use self::audible::SoundNotifier;
pub use self::content::{NotificationContent, NOTIFICATION_TAG};
pub use self::desktop::DesktopNotifier;
pub use self::dispatcher::CompletionDispatcher;
pub use self::error::NotificationError;

/// Something that announces a completed interval.
pub trait Notifier {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Announces that the `completed` interval ran out.
    ///
    /// # Errors
    ///
    /// Returns an error if the announcement could not be delivered.
    fn notify(&self, completed: TimerMode) -> Result<(), NotificationError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn notify(&self, completed: TimerMode) -> Result<(), NotificationError> {
        (**self).notify(completed)
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn notify(&self, completed: TimerMode) -> Result<(), NotificationError> {
        (**self).notify(completed)
    }
}

// ============================================================================
// NotifierSet
// ============================================================================

/// Fans one completion out to several notifiers.
///
/// Each notifier is attempted independently; a failure is logged and the
/// rest still run.
#[derive(Default)]
pub struct NotifierSet {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a notifier, builder style.
    #[must_use]
    pub fn with<N: Notifier + 'static>(mut self, notifier: N) -> Self {
        self.push(notifier);
        self
    }

    pub fn push<N: Notifier + 'static>(&mut self, notifier: N) {
        self.notifiers.push(Box::new(notifier));
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    /// Runs every notifier and returns how many succeeded.
    pub fn dispatch(&self, completed: TimerMode) -> usize {
        let mut delivered = 0;
        for notifier in &self.notifiers {
            match notifier.notify(completed) {
                Ok(()) => {
                    debug!(notifier = notifier.name(), "Notification delivered");
                    delivered += 1;
                }
                Err(e) => warn!("{} notifier failed: {}", notifier.name(), e),
            }
        }
        delivered
    }
}

impl Notifier for NotifierSet {
    fn name(&self) -> &'static str {
        "set"
    }

    /// Never fails; individual failures are only logged.
    fn notify(&self, completed: TimerMode) -> Result<(), NotificationError> {
        self.dispatch(completed);
        Ok(())
    }
}

impl std::fmt::Debug for NotifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.notifiers.iter().map(|n| n.name()).collect();
        f.debug_struct("NotifierSet").field("notifiers", &names).finish()
    }
}

// ============================================================================
// MockNotifier
// ============================================================================

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    calls: Mutex<Vec<TimerMode>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that fails every call.
    #[must_use]
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.should_fail
            .store(true, std::sync::atomic::Ordering::SeqCst);
        mock
    }

    #[must_use]
    pub fn calls(&self) -> Vec<TimerMode> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

impl Notifier for MockNotifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn notify(&self, completed: TimerMode) -> Result<(), NotificationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(completed);
        }
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("mock failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_continues_after_failure() {
        let failing = Arc::new(MockNotifier::failing());
        let working = Arc::new(MockNotifier::new());
        let set = NotifierSet::new().with(failing.clone()).with(working.clone());

        let delivered = set.dispatch(TimerMode::Work);

        assert_eq!(delivered, 1);
        assert_eq!(failing.calls(), vec![TimerMode::Work]);
        assert_eq!(working.calls(), vec![TimerMode::Work]);
    }

    #[test]
    fn test_set_never_reports_errors() {
        let set = NotifierSet::new().with(MockNotifier::failing());
        assert!(set.notify(TimerMode::LongBreak).is_ok());
    }

    #[test]
    fn test_empty_set() {
        let set = NotifierSet::new();
        assert!(set.is_empty());
        assert_eq!(set.dispatch(TimerMode::Work), 0);
    }

    #[test]
    fn test_set_debug_lists_names() {
        let set = NotifierSet::new()
            .with(MockNotifier::new())
            .with(DesktopNotifier::new());
        assert_eq!(set.len(), 2);
        assert_eq!(
            format!("{:?}", set),
            r#"NotifierSet { notifiers: ["mock", "desktop"] }"#
        );
    }
}
