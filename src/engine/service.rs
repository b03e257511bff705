//! Scheduler that drives the timer engine.
//!
//! `TimerService` owns a [`TimerEngine`] and is the only code that mutates
//! it. Commands from [`TimerHandle`]s and one-second ticks are serialized
//! through a single `tokio::select!` loop, so the engine never sees
//! concurrent access. Ticks are only delivered while the engine runs.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::timer::{TickOutcome, TimerEngine};
use crate::types::{ConfigError, PomodoroConfig, TimerState, Transition};

/// Tick period of the scheduler.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Command / TimerEvent
// ============================================================================

/// Requests accepted by the service loop.
#[derive(Debug)]
pub enum Command {
    Start,
    Pause,
    /// Start if paused, pause if running
    Toggle,
    Reset,
    Skip,
    /// Replace the configuration snapshot
    Reconfigure(PomodoroConfig),
    /// Reply with a copy of the current state
    Status(oneshot::Sender<TimerState>),
    /// Stop the service loop
    Shutdown,
}

/// Something that happened to the timer.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started,
    /// Countdown paused
    Paused,
    /// Current interval rewound to its full length
    Reset,
    /// Interval skipped by the user
    Skipped(Transition),
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Interval ran out on its own
    Completed(Transition),
    /// New configuration accepted
    Reconfigured(PomodoroConfig),
    /// New configuration rejected; the previous one stays active
    ConfigRejected(ConfigError),
}

/// An event paired with the state right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerUpdate {
    pub event: TimerEvent,
    pub state: TimerState,
}

// ============================================================================
// ServiceError
// ============================================================================

/// Errors returned by [`TimerHandle`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service loop is no longer running.
    #[error("timer service has stopped")]
    Closed,
}

// ============================================================================
// TimerHandle
// ============================================================================

/// Cloneable front end for a running [`TimerService`].
#[derive(Debug, Clone)]
pub struct TimerHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl TimerHandle {
    /// Sends a raw command to the service.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Closed` if the service loop has exited.
    pub fn send(&self, command: Command) -> Result<(), ServiceError> {
        self.commands.send(command).map_err(|_| ServiceError::Closed)
    }

    /// Starts or resumes the countdown.
    pub fn start(&self) -> Result<(), ServiceError> {
        self.send(Command::Start)
    }

    /// Pauses the countdown, keeping the remaining time.
    pub fn pause(&self) -> Result<(), ServiceError> {
        self.send(Command::Pause)
    }

    /// Pauses if running, starts otherwise.
    pub fn toggle(&self) -> Result<(), ServiceError> {
        self.send(Command::Toggle)
    }

    /// Stops and restores the full length of the current mode.
    pub fn reset(&self) -> Result<(), ServiceError> {
        self.send(Command::Reset)
    }

    /// Moves to the next mode without a completion notification.
    pub fn skip(&self) -> Result<(), ServiceError> {
        self.send(Command::Skip)
    }

    /// Replaces the configuration.
    ///
    /// The running interval keeps its length; the change applies from the
    /// next transition or reset. Invalid values are reported as
    /// [`TimerEvent::ConfigRejected`].
    pub fn reconfigure(&self, config: PomodoroConfig) -> Result<(), ServiceError> {
        self.send(Command::Reconfigure(config))
    }

    /// Asks the service loop to exit and hand back the engine.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Closed` if the service loop has exited.
    pub fn shutdown(&self) -> Result<(), ServiceError> {
        self.send(Command::Shutdown)
    }

    /// Queries the current state.
    ///
    /// The reply is ordered after every command sent before it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Closed` if the service loop has exited.
    pub async fn status(&self) -> Result<TimerState, ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Status(tx))?;
        rx.await.map_err(|_| ServiceError::Closed)
    }
}

// ============================================================================
// TimerService
// ============================================================================

/// Scheduler loop that owns the engine.
pub struct TimerService {
    engine: TimerEngine,
    commands: mpsc::UnboundedReceiver<Command>,
    updates: mpsc::UnboundedSender<TimerUpdate>,
}

impl TimerService {
    /// Creates a service along with its handle and update stream.
    pub fn new(engine: TimerEngine) -> (Self, TimerHandle, mpsc::UnboundedReceiver<TimerUpdate>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let service = Self {
            engine,
            commands: command_rx,
            updates: update_tx,
        };
        (service, TimerHandle { commands: command_tx }, update_rx)
    }

    /// Runs the loop until `Shutdown` arrives or every handle is dropped.
    ///
    /// Returns the engine so callers can inspect the final state.
    pub async fn run(mut self) -> TimerEngine {
        let mut ticker = interval(TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => {
                    match command {
                        Some(Command::Shutdown) | None => break,
                        Some(command) => self.apply(command, &mut ticker),
                    }
                }
                _ = ticker.tick(), if self.engine.is_running() => {
                    self.on_tick();
                }
            }
        }

        info!("Timer service stopped");
        self.engine
    }

    fn apply(&mut self, command: Command, ticker: &mut Interval) {
        match command {
            Command::Start => self.start(ticker),
            Command::Pause => self.pause(),
            Command::Toggle => {
                if self.engine.is_running() {
                    self.pause();
                } else {
                    self.start(ticker);
                }
            }
            Command::Reset => {
                self.engine.reset();
                self.publish(TimerEvent::Reset);
            }
            Command::Skip => {
                let transition = self.engine.skip();
                self.publish(TimerEvent::Skipped(transition));
            }
            Command::Reconfigure(config) => match self.engine.reconfigure(config) {
                Ok(()) => {
                    info!(?config, "Configuration updated");
                    self.publish(TimerEvent::Reconfigured(config));
                }
                Err(e) => {
                    warn!("Rejected configuration: {}", e);
                    self.publish(TimerEvent::ConfigRejected(e));
                }
            },
            Command::Status(reply) => {
                let _ = reply.send(self.engine.state().clone());
            }
            Command::Shutdown => {}
        }
    }

    fn start(&mut self, ticker: &mut Interval) {
        if self.engine.is_running() {
            return;
        }
        self.engine.start();
        if self.engine.is_running() {
            // First tick lands one full period after the start.
            ticker.reset();
            self.publish(TimerEvent::Started);
        }
    }

    fn pause(&mut self) {
        if self.engine.is_running() {
            self.engine.pause();
            self.publish(TimerEvent::Paused);
        }
    }

    fn on_tick(&mut self) {
        match self.engine.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Counting { remaining_seconds } => {
                self.publish(TimerEvent::Tick { remaining_seconds });
            }
            TickOutcome::Completed(transition) => {
                info!(
                    from = transition.from.as_str(),
                    to = transition.to.as_str(),
                    sessions = transition.sessions_completed,
                    "Interval finished"
                );
                self.publish(TimerEvent::Completed(transition));
            }
        }
    }

    fn publish(&self, event: TimerEvent) {
        let update = TimerUpdate {
            event,
            state: self.engine.state().clone(),
        };
        if self.updates.send(update).is_err() {
            debug!("Update receiver dropped; event discarded");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimerMode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn one_minute_config() -> PomodoroConfig {
        PomodoroConfig::default()
            .with_work_duration(1)
            .with_short_break_duration(1)
            .with_long_break_duration(2)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<TimerUpdate>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(update) = rx.try_recv() {
            events.push(update.event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_until_started() {
        let engine = TimerEngine::new(one_minute_config()).unwrap();
        let (service, handle, mut rx) = TimerService::new(engine);
        let task = tokio::spawn(service.run());

        sleep(Duration::from_secs(5)).await;

        assert!(drain(&mut rx).is_empty());
        let state = handle.status().await.unwrap();
        assert_eq!(state.remaining_seconds, 60);

        handle.shutdown().unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_interval_completes_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let engine = TimerEngine::new(one_minute_config())
            .unwrap()
            .with_on_complete(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        let (service, handle, mut rx) = TimerService::new(engine);
        let task = tokio::spawn(service.run());

        handle.start().unwrap();
        sleep(Duration::from_millis(60_500)).await;

        let events = drain(&mut rx);
        assert_eq!(events.first(), Some(&TimerEvent::Started));
        let ticks = events
            .iter()
            .filter(|e| matches!(e, TimerEvent::Tick { .. }))
            .count();
        assert_eq!(ticks, 59);
        assert_eq!(
            events.last(),
            Some(&TimerEvent::Completed(Transition {
                from: TimerMode::Work,
                to: TimerMode::ShortBreak,
                sessions_completed: 1,
            }))
        );
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Not running after completion: no further ticks.
        sleep(Duration::from_secs(10)).await;
        assert!(drain(&mut rx).is_empty());

        handle.shutdown().unwrap();
        let engine = task.await.unwrap();
        assert_eq!(engine.mode(), TimerMode::ShortBreak);
        assert!(!engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticks() {
        let engine = TimerEngine::new(one_minute_config()).unwrap();
        let (service, handle, mut rx) = TimerService::new(engine);
        let task = tokio::spawn(service.run());

        handle.start().unwrap();
        sleep(Duration::from_millis(3_500)).await;
        handle.pause().unwrap();
        let paused = handle.status().await.unwrap();
        drain(&mut rx);

        sleep(Duration::from_secs(10)).await;

        assert!(drain(&mut rx).is_empty());
        assert_eq!(handle.status().await.unwrap(), paused);
        assert_eq!(paused.remaining_seconds, 57);

        handle.shutdown().unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_publishes_transition_without_completion() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let engine = TimerEngine::new(one_minute_config())
            .unwrap()
            .with_on_complete(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        let (service, handle, mut rx) = TimerService::new(engine);
        let task = tokio::spawn(service.run());

        handle.start().unwrap();
        handle.skip().unwrap();
        let state = handle.status().await.unwrap();

        let events = drain(&mut rx);
        assert!(matches!(events.last(), Some(TimerEvent::Skipped(t)) if t.to == TimerMode::ShortBreak));
        assert!(!state.running);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        handle.shutdown().unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_and_duplicate_start() {
        let engine = TimerEngine::new(one_minute_config()).unwrap();
        let (service, handle, mut rx) = TimerService::new(engine);
        let task = tokio::spawn(service.run());

        handle.toggle().unwrap();
        handle.start().unwrap();
        handle.toggle().unwrap();
        handle.pause().unwrap();
        handle.status().await.unwrap();

        assert_eq!(drain(&mut rx), vec![TimerEvent::Started, TimerEvent::Paused]);

        handle.shutdown().unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_reports_rejection() {
        let engine = TimerEngine::new(one_minute_config()).unwrap();
        let (service, handle, mut rx) = TimerService::new(engine);
        let task = tokio::spawn(service.run());

        handle
            .reconfigure(PomodoroConfig::default().with_sessions_until_long_break(0))
            .unwrap();
        handle.reconfigure(PomodoroConfig::default()).unwrap();
        handle.reset().unwrap();
        let state = handle.status().await.unwrap();

        let events = drain(&mut rx);
        assert!(matches!(events[0], TimerEvent::ConfigRejected(_)));
        assert_eq!(events[1], TimerEvent::Reconfigured(PomodoroConfig::default()));
        assert_eq!(events[2], TimerEvent::Reset);
        assert_eq!(state.remaining_seconds, 25 * 60);

        handle.shutdown().unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_service_stops_when_handles_dropped() {
        let engine = TimerEngine::new(one_minute_config()).unwrap();
        let (service, handle, _rx) = TimerService::new(engine);
        let task = tokio::spawn(service.run());

        drop(handle);

        let engine = task.await.unwrap();
        assert_eq!(engine.mode(), TimerMode::Work);
    }

    #[tokio::test]
    async fn test_handle_reports_closed_service() {
        let engine = TimerEngine::new(one_minute_config()).unwrap();
        let (service, handle, _rx) = TimerService::new(engine);
        drop(service);

        assert_eq!(handle.start(), Err(ServiceError::Closed));
        assert_eq!(handle.status().await, Err(ServiceError::Closed));
    }
}
