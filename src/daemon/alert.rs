//! Expiry alert coordination.
//!
//! When the countdown expires the coordinator starts an alert episode:
//! a repeating tone, a blinking tray icon and a notification (or a blocking
//! prompt when no notification can be shown). The episode ends on user
//! acknowledgment (`dismiss`) or when the timer is stopped or restarted
//! (`silence`). The coordinator never changes the timer phase.

use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::daemon::timer::TimerEvent;
use crate::notification::{AcknowledgePrompt, NotificationSender};
use crate::sound::{SoundPlayer, SoundSource};
use crate::types::{AlertConfig, AlertState, EXPIRED_BODY, STATUS_EXPIRED};

// ============================================================================
// AlertCoordinator
// ============================================================================

/// Drives the tone, blink and notification of an expiry alert.
pub struct AlertCoordinator {
    state: AlertState,
    config: AlertConfig,
    notifier: Arc<dyn NotificationSender>,
    prompt: Arc<dyn AcknowledgePrompt>,
    player: Option<Arc<dyn SoundPlayer>>,
    sound: SoundSource,
    /// An episode is in progress (expired and not yet silenced)
    active: bool,
    /// Episode counter, so a late prompt acknowledgment cannot dismiss a
    /// newer alert
    episode: u64,
    ack_tx: mpsc::UnboundedSender<u64>,
    ack_rx: mpsc::UnboundedReceiver<u64>,
    state_tx: watch::Sender<AlertState>,
}

impl AlertCoordinator {
    /// Creates a coordinator with no alert in progress.
    pub fn new(
        config: AlertConfig,
        notifier: Arc<dyn NotificationSender>,
        prompt: Arc<dyn AcknowledgePrompt>,
        player: Option<Arc<dyn SoundPlayer>>,
    ) -> Self {
        let (ack_tx, ack_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(AlertState::default());
        Self {
            state: AlertState::default(),
            config,
            notifier,
            prompt,
            player,
            sound: SoundSource::alarm(),
            active: false,
            episode: 0,
            ack_tx,
            ack_rx,
            state_tx,
        }
    }

    /// Replaces the synthesized tone with another sound.
    pub fn with_sound(mut self, sound: SoundSource) -> Self {
        self.sound = sound;
        self
    }

    /// Starts an alert episode and delivers its notification.
    ///
    /// If no notification can be shown, the acknowledgment prompt runs in the
    /// background and its acknowledgment dismisses the alert.
    pub async fn on_expired(&mut self) {
        self.begin_episode().deliver().await;
    }

    /// Starts an alert episode: plays the first beep immediately and returns
    /// the notification still to be delivered.
    ///
    /// The notice does not borrow the coordinator, so it can be delivered
    /// after the lock guarding the coordinator is released.
    pub fn begin_episode(&mut self) -> ExpiryNotice {
        // Reactions to an earlier notification must not dismiss this one
        while self.notifier.try_recv_action().is_some() {}

        self.episode = self.episode.wrapping_add(1);
        self.active = true;
        self.state = AlertState {
            tone_active: self.sound_available(),
            blink_on: true,
            dismissed: false,
        };
        info!(
            "Alert started (tone: {})",
            if self.state.tone_active { "on" } else { "off" }
        );
        self.publish();

        self.tone_tick();

        ExpiryNotice {
            enabled: self.config.notifications_enabled,
            notifier: Arc::clone(&self.notifier),
            prompt: Arc::clone(&self.prompt),
            ack_tx: self.ack_tx.clone(),
            episode: self.episode,
        }
    }

    /// Acknowledges the alert: stops tone and blink and closes the
    /// notification. The timer phase is left alone.
    ///
    /// Returns false if there was no alert to dismiss.
    pub fn dismiss(&mut self) -> bool {
        if !self.active || self.state.dismissed {
            debug!("Nothing to dismiss");
            return false;
        }

        self.state = AlertState {
            tone_active: false,
            blink_on: false,
            dismissed: true,
        };
        self.notifier.clear_all();
        info!("Alert dismissed");
        self.publish();
        true
    }

    /// Ends the alert episode because the timer was stopped or restarted.
    pub fn silence(&mut self) {
        if !self.active {
            return;
        }

        if !self.state.dismissed {
            self.notifier.clear_all();
        }
        self.active = false;
        self.state = AlertState::default();
        debug!("Alert silenced");
        self.publish();
    }

    /// Plays one beep if the tone is active.
    ///
    /// A device failure turns the tone off for the rest of the episode.
    pub fn tone_tick(&mut self) {
        if !self.state.tone_active {
            return;
        }
        let Some(player) = &self.player else {
            return;
        };

        if let Err(e) = player.play(&self.sound) {
            warn!("Alert tone failed: {}", e);
            if e.is_device_error() {
                self.state.tone_active = false;
                self.publish();
            }
        }
    }

    /// Toggles the blink frame, after handling any pending acknowledgment.
    pub fn blink_tick(&mut self) {
        if self.poll_acknowledgements() {
            return;
        }
        if !self.is_blinking() {
            return;
        }

        self.state.blink_on = !self.state.blink_on;
        self.publish();
    }

    /// Dismisses the alert if the user reacted to the notification or the
    /// prompt. Returns true if that happened.
    pub fn poll_acknowledgements(&mut self) -> bool {
        let mut acknowledged = false;
        while let Some(action) = self.notifier.try_recv_action() {
            debug!("Notification action: {:?}", action);
            acknowledged = true;
        }
        while let Ok(episode) = self.ack_rx.try_recv() {
            if episode == self.episode {
                acknowledged = true;
            }
        }
        acknowledged && self.dismiss()
    }

    /// Returns the current presentation state.
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Returns true while an undismissed alert is in progress.
    pub fn is_blinking(&self) -> bool {
        self.active && !self.state.dismissed
    }

    /// Returns true while an alert episode is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Subscribes to alert state changes.
    pub fn subscribe(&self) -> watch::Receiver<AlertState> {
        self.state_tx.subscribe()
    }

    /// Tone repetition period.
    pub fn tone_interval(&self) -> Duration {
        Duration::from_millis(self.config.tone_interval_ms)
    }

    /// Blink period.
    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.config.blink_interval_ms)
    }

    fn sound_available(&self) -> bool {
        self.config.sound_enabled
            && self
                .player
                .as_ref()
                .is_some_and(|p| p.is_available())
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state);
    }
}

// ============================================================================
// ExpiryNotice
// ============================================================================

/// The notification of one alert episode, detached from the coordinator.
pub struct ExpiryNotice {
    enabled: bool,
    notifier: Arc<dyn NotificationSender>,
    prompt: Arc<dyn AcknowledgePrompt>,
    ack_tx: mpsc::UnboundedSender<u64>,
    episode: u64,
}

impl ExpiryNotice {
    /// Shows the notification, falling back to the acknowledgment prompt.
    ///
    /// The prompt runs on its own task; its acknowledgment reaches the
    /// coordinator tagged with this episode.
    pub async fn deliver(self) {
        if !self.enabled {
            return;
        }

        if self.notifier.is_available() {
            match self.notifier.send_expired(STATUS_EXPIRED, EXPIRED_BODY).await {
                Ok(()) => return,
                Err(e) => warn!("Notification failed: {} ({})", e, e.suggestion()),
            }
        }

        if !self.prompt.is_available() {
            warn!("No notification or prompt available, alert is tray-only");
            return;
        }

        let Self {
            prompt,
            ack_tx,
            episode,
            ..
        } = self;
        tokio::spawn(async move {
            match prompt.acknowledge(STATUS_EXPIRED, EXPIRED_BODY).await {
                Ok(()) => {
                    let _ = ack_tx.send(episode);
                }
                Err(e) => warn!("Prompt failed: {} ({})", e, e.suggestion()),
            }
        });
    }
}

// ============================================================================
// Alert loop
// ============================================================================

/// Consumes timer events and drives the tone and blink tickers.
///
/// Runs until the timer event channel closes.
pub async fn run_alerts(
    alerts: Arc<Mutex<AlertCoordinator>>,
    mut events: mpsc::UnboundedReceiver<TimerEvent>,
) {
    let (tone_period, blink_period) = {
        let alerts = alerts.lock().await;
        (alerts.tone_interval(), alerts.blink_interval())
    };
    let mut tone = interval(tone_period);
    tone.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut blink = interval(blink_period);
    blink.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let (tone_on, blink_on) = {
            let alerts = alerts.lock().await;
            (alerts.state().tone_active, alerts.is_blinking())
        };

        tokio::select! {
            event = events.recv() => match event {
                Some(TimerEvent::Expired) => {
                    let notice = alerts.lock().await.begin_episode();
                    tokio::spawn(notice.deliver());
                    tone.reset();
                    blink.reset();
                }
                Some(TimerEvent::Stopped) | Some(TimerEvent::Started { .. }) => {
                    alerts.lock().await.silence();
                }
                Some(_) => {}
                None => break,
            },
            _ = tone.tick(), if tone_on => {
                alerts.lock().await.tone_tick();
            }
            _ = blink.tick(), if blink_on => {
                alerts.lock().await.blink_tick();
            }
        }
    }

    debug!("Alert loop stopped");
}

// ============================================================================
// Tests
// ============================================================================
