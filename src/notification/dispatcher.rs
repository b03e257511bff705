//! Background thread that delivers completion notifications.
//!
//! The engine's completion callback only enqueues the expired mode; the
//! notifier runs on its own thread. Audio output streams are not `Send`, so
//! the notifier is built on that thread from a factory closure.

use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::Notifier;
use crate::types::TimerMode;

/// Owns the notification thread and the sending side of its queue.
#[derive(Debug)]
pub struct CompletionDispatcher {
    sender: Sender<TimerMode>,
    thread: JoinHandle<()>,
}

impl CompletionDispatcher {
    /// Spawns the notification thread and builds the notifier on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn<F, N>(build: F) -> io::Result<Self>
    where
        F: FnOnce() -> N + Send + 'static,
        N: Notifier,
    {
        let (sender, receiver) = mpsc::channel::<TimerMode>();
        let thread = thread::Builder::new()
            .name("notifier".to_string())
            .spawn(move || {
                let notifier = build();
                debug!(notifier = notifier.name(), "Notification thread started");
                for completed in receiver {
                    if let Err(e) = notifier.notify(completed) {
                        warn!("{} notifier failed: {}", notifier.name(), e);
                    }
                }
                debug!("Notification thread finished");
            })?;

        Ok(Self { sender, thread })
    }

    /// Returns a completion callback for [`TimerEngine`](crate::engine::TimerEngine).
    ///
    /// The callback never blocks; if the thread has gone away the
    /// notification is dropped with a warning.
    pub fn callback(&self) -> impl FnMut(TimerMode) + Send + 'static {
        let sender = self.sender.clone();
        move |completed| {
            if sender.send(completed).is_err() {
                warn!("Notification thread is gone; dropping {} notification", completed.as_str());
            }
        }
    }

    /// Closes the queue and waits for pending notifications.
    ///
    /// Every callback returned by [`callback`](Self::callback) must be
    /// dropped first, or this waits forever.
    pub fn shutdown(self) {
        drop(self.sender);
        if self.thread.join().is_err() {
            warn!("Notification thread panicked");
        }
    }
}
