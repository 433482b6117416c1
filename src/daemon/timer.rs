//! Timer engine for the tray timer.
//!
//! This module provides the core countdown functionality:
//! - State transitions (Idle → Running ⇄ Paused → Alerting → Idle)
//! - Snapshot broadcast to subscribers (tray, status queries)
//! - Event firing for the alert coordinator
//! - The cooperative ticker driving the countdown

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::duration::{self, ParseError};
use crate::types::{TimerPhase, TimerSnapshot, TimerState};

/// Period of the countdown ticker.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Snapshots buffered per subscriber before it starts lagging.
const SNAPSHOT_CAPACITY: usize = 64;

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the alert coordinator and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started
    Started {
        /// Initial seconds
        seconds: u64,
    },
    /// Countdown paused
    Paused,
    /// Countdown resumed
    Resumed,
    /// Remaining time changed by a user adjustment
    Adjusted {
        /// Requested change in seconds
        delta: i64,
        /// Remaining seconds after clamping
        remaining_seconds: u64,
    },
    /// Timer stopped and reset
    Stopped,
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u64,
    },
    /// Countdown reached zero. Fired once per countdown.
    Expired,
}

// ============================================================================
// CommandOutcome
// ============================================================================

/// Result of a user command on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command changed the timer
    Applied,
    /// The command has no meaning in the current phase
    Ignored,
}

impl CommandOutcome {
    /// Returns true if the command changed the timer.
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}

// ============================================================================
// Subscription
// ============================================================================

/// A stream of timer snapshots.
///
/// The first value is the snapshot current at subscription time, followed by
/// every later snapshot in emission order.
pub struct Subscription {
    initial: Option<TimerSnapshot>,
    rx: broadcast::Receiver<TimerSnapshot>,
}

impl Subscription {
    /// Waits for the next snapshot.
    ///
    /// Returns `None` once the engine is gone. A subscriber that fell behind
    /// skips the snapshots it missed.
    pub async fn recv(&mut self) -> Option<TimerSnapshot> {
        if let Some(snapshot) = self.initial.take() {
            return Some(snapshot);
        }
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Snapshot subscriber lagged, skipped {} snapshots", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next snapshot if one is already queued.
    pub fn try_recv(&mut self) -> Option<TimerSnapshot> {
        if let Some(snapshot) = self.initial.take() {
            return Some(snapshot);
        }
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the countdown state and publishes its changes.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    /// Snapshot fan-out
    snapshot_tx: broadcast::Sender<TimerSnapshot>,
    /// Tick schedule generation, bumped whenever the next tick must be a full
    /// period away
    schedule_tx: watch::Sender<u64>,
}

impl TimerEngine {
    /// Creates a new idle TimerEngine with the given event channel.
    pub fn new(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        let (snapshot_tx, _) = broadcast::channel(SNAPSHOT_CAPACITY);
        let (schedule_tx, _) = watch::channel(0);
        Self {
            state: TimerState::new(),
            event_tx,
            snapshot_tx,
            schedule_tx,
        }
    }

    /// Starts a countdown from duration text.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `text` is not a valid duration. The state
    /// is left untouched in that case.
    pub fn start(&mut self, text: &str) -> Result<CommandOutcome, ParseError> {
        let seconds = duration::parse(text)?;
        Ok(self.start_seconds(seconds))
    }

    /// Starts a countdown from an already parsed number of seconds.
    pub fn start_seconds(&mut self, seconds: u64) -> CommandOutcome {
        if !self.state.start(seconds) {
            debug!("Ignoring start in phase {}", self.state.phase.as_str());
            return CommandOutcome::Ignored;
        }

        info!("Timer started: {}", duration::format_canonical(seconds));
        self.restart_schedule();
        self.emit(TimerEvent::Started { seconds });
        self.publish();
        CommandOutcome::Applied
    }

    /// Stops the timer and resets it to idle.
    pub fn stop(&mut self) -> CommandOutcome {
        if !self.state.stop() {
            debug!("Ignoring stop while idle");
            return CommandOutcome::Ignored;
        }

        info!("Timer stopped");
        self.emit(TimerEvent::Stopped);
        self.publish();
        CommandOutcome::Applied
    }

    /// Toggles between running and paused.
    ///
    /// Resuming restarts the tick schedule, so the next decrement happens one
    /// full period later.
    pub fn pause_resume(&mut self) -> CommandOutcome {
        if !self.state.toggle_pause() {
            debug!("Ignoring pause/resume in phase {}", self.state.phase.as_str());
            return CommandOutcome::Ignored;
        }

        if self.state.is_running() {
            info!("Timer resumed");
            self.restart_schedule();
            self.emit(TimerEvent::Resumed);
        } else {
            info!("Timer paused");
            self.emit(TimerEvent::Paused);
        }
        self.publish();
        CommandOutcome::Applied
    }

    /// Adds `delta_seconds` to the remaining time, clamped at zero.
    pub fn adjust(&mut self, delta_seconds: i64) -> CommandOutcome {
        if !self.state.adjust(delta_seconds) {
            debug!("Ignoring adjust in phase {}", self.state.phase.as_str());
            return CommandOutcome::Ignored;
        }

        debug!(
            "Adjusted by {}s, {}s remaining",
            delta_seconds, self.state.remaining_seconds
        );
        self.emit(TimerEvent::Adjusted {
            delta: delta_seconds,
            remaining_seconds: self.state.remaining_seconds,
        });
        self.publish();
        CommandOutcome::Applied
    }

    /// Advances the countdown by one second.
    ///
    /// Returns true if this tick expired the timer.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let expired = self.state.tick();
        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        });
        if expired {
            info!("Timer expired");
            self.emit(TimerEvent::Expired);
        }
        self.publish();
        expired
    }

    /// Subscribes to snapshots, starting with the current one.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            initial: Some(self.state.snapshot()),
            rx: self.snapshot_tx.subscribe(),
        }
    }

    /// Returns a receiver that changes whenever the tick schedule restarts.
    pub fn schedule(&self) -> watch::Receiver<u64> {
        self.schedule_tx.subscribe()
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    fn restart_schedule(&self) {
        self.schedule_tx.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Timer event receiver dropped");
        }
    }

    fn publish(&self) {
        // No subscribers is fine
        let _ = self.snapshot_tx.send(self.state.snapshot());
    }
}

// ============================================================================
// Ticker
// ============================================================================

/// Drives `TimerEngine::tick` every `period`.
///
/// The interval restarts whenever the engine restarts its schedule (start,
/// resume). Runs until the engine's schedule channel closes.
pub async fn run_ticker(engine: Arc<Mutex<TimerEngine>>, period: Duration) {
    let mut schedule = engine.lock().await.schedule();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mut engine = engine.lock().await;
                // A command restarted the schedule while this tick was pending
                if schedule.has_changed().unwrap_or(false) {
                    schedule.borrow_and_update();
                    ticker.reset();
                    continue;
                }
                engine.tick();
            }
            changed = schedule.changed() => {
                if changed.is_err() {
                    break;
                }
                ticker.reset();
            }
        }
    }

    debug!("Ticker stopped");
}

// ============================================================================
// Tests
// ============================================================================
