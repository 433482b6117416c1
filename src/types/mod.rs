//! Core data types for the tray timer.
//!
//! This module defines the data structures used for:
//! - Timer state and its four-phase lifecycle
//! - Snapshots broadcast to observers
//! - Alert presentation state and configuration
//! - IPC request/response serialization

use serde::{Deserialize, Serialize};

use crate::duration::format_clock;

// ============================================================================
// Status strings
// ============================================================================

/// Status line while counting down.
pub const STATUS_RUNNING: &str = "Таймер запущен...";
/// Status line while paused.
pub const STATUS_PAUSED: &str = "Таймер на паузе";
/// Status line while idle.
pub const STATUS_STOPPED: &str = "Таймер остановлен";
/// Status line (and notification title) once the countdown expired.
pub const STATUS_EXPIRED: &str = "⏰ Время истекло!";
/// Status line after the alert was acknowledged.
pub const STATUS_DISMISSED: &str = "Уведомление отключено";
/// Notification body on expiry.
pub const EXPIRED_BODY: &str = "Таймер завершил отсчет.";
/// Pause/resume affordance label while running.
pub const LABEL_PAUSE: &str = "Пауза";
/// Pause/resume affordance label while paused.
pub const LABEL_RESUME: &str = "Возобновить";

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// No countdown
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Countdown frozen
    Paused,
    /// Countdown reached zero
    Alerting,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Alerting => "alerting",
        }
    }

    /// Returns true while a countdown is in progress (running or paused).
    pub fn is_active(&self) -> bool {
        matches!(self, TimerPhase::Running | TimerPhase::Paused)
    }

    /// Returns the user-facing status line for this phase.
    pub fn status_text(&self) -> &'static str {
        match self {
            TimerPhase::Idle => STATUS_STOPPED,
            TimerPhase::Running => STATUS_RUNNING,
            TimerPhase::Paused => STATUS_PAUSED,
            TimerPhase::Alerting => STATUS_EXPIRED,
        }
    }
}

/// Status line shown for a phase, taking an acknowledged alert into account.
pub fn status_line(phase: TimerPhase, alert: &AlertState) -> &'static str {
    if phase == TimerPhase::Alerting && alert.dismissed {
        STATUS_DISMISSED
    } else {
        phase.status_text()
    }
}

/// Label of the pause/resume affordance for a phase.
pub fn pause_label(phase: TimerPhase) -> &'static str {
    if phase == TimerPhase::Paused {
        LABEL_RESUME
    } else {
        LABEL_PAUSE
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The single timer's state.
///
/// Transition methods return whether they changed anything; calls that have
/// no meaning in the current phase leave the state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Seconds left in the countdown
    pub remaining_seconds: u64,
}

impl TimerState {
    /// Creates a new TimerState in idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting down from `seconds`. Only valid while idle.
    pub fn start(&mut self, seconds: u64) -> bool {
        if self.phase != TimerPhase::Idle {
            return false;
        }
        self.phase = TimerPhase::Running;
        self.remaining_seconds = seconds;
        true
    }

    /// Toggles between running and paused.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            TimerPhase::Running => {
                self.phase = TimerPhase::Paused;
                true
            }
            TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                true
            }
            TimerPhase::Idle | TimerPhase::Alerting => false,
        }
    }

    /// Adds `delta_seconds` to the remaining time, clamped at zero.
    ///
    /// Never changes the phase; a countdown adjusted down to zero expires on
    /// the next tick.
    pub fn adjust(&mut self, delta_seconds: i64) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_add_signed(delta_seconds);
        true
    }

    /// Resets to idle with nothing remaining.
    pub fn stop(&mut self) -> bool {
        if self.phase == TimerPhase::Idle {
            return false;
        }
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = 0;
        true
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if this tick expired the timer (entered `Alerting`).
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Alerting;
            return true;
        }
        false
    }

    /// Returns true if the timer is counting down.
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Returns true if the timer is paused.
    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }

    /// Returns an immutable view for observers.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            is_running: self.is_running(),
            is_paused: self.is_paused(),
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Point-in-time view of `TimerState` sent to observers.
///
/// `is_running` and `is_paused` are derived from `phase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Phase at the time of the snapshot
    pub phase: TimerPhase,
    /// Seconds left
    pub remaining_seconds: u64,
    /// Counting down
    pub is_running: bool,
    /// Frozen
    pub is_paused: bool,
}

// ============================================================================
// AlertState
// ============================================================================

/// Presentation state of an expiry alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertState {
    /// The repeating tone is scheduled
    pub tone_active: bool,
    /// Current blink frame of the tray icon
    pub blink_on: bool,
    /// The user acknowledged the alert
    pub dismissed: bool,
}

// ============================================================================
// AlertConfig
// ============================================================================

/// Configuration for expiry alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Tone repetition period in milliseconds (100-10000)
    pub tone_interval_ms: u64,
    /// Blink period in milliseconds (100-10000)
    pub blink_interval_ms: u64,
    /// Whether to play the tone
    pub sound_enabled: bool,
    /// Whether to show a notification (or the fallback prompt)
    pub notifications_enabled: bool,
    /// Sound file name or path replacing the synthesized tone
    pub sound: Option<String>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            tone_interval_ms: 600,
            blink_interval_ms: 500,
            sound_enabled: true,
            notifications_enabled: true,
            sound: None,
        }
    }
}

impl AlertConfig {
    /// Sets the tone repetition period.
    pub fn with_tone_interval_ms(mut self, ms: u64) -> Self {
        self.tone_interval_ms = ms;
        self
    }

    /// Sets the blink period.
    pub fn with_blink_interval_ms(mut self, ms: u64) -> Self {
        self.blink_interval_ms = ms;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if !(100..=10_000).contains(&self.tone_interval_ms) {
            return Err("Интервал сигнала должен быть от 100 до 10000 мс".to_string());
        }
        if !(100..=10_000).contains(&self.blink_interval_ms) {
            return Err("Интервал мигания должен быть от 100 до 10000 мс".to_string());
        }
        if matches!(self.sound.as_deref(), Some(s) if s.trim().is_empty()) {
            return Err("Имя звука не может быть пустым".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// IPC Types
// ============================================================================

/// IPC request from client to daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start a countdown from duration text
    Start {
        /// Duration text, e.g. "25m"
        duration: String,
    },
    /// Stop and reset the timer
    Stop,
    /// Toggle pause
    PauseResume,
    /// Add seconds to the running countdown
    Adjust {
        /// Seconds to add (negative subtracts)
        delta: i64,
    },
    /// Acknowledge the expiry alert
    Dismiss,
    /// Query the current status
    Status,
    /// Stop the daemon
    Shutdown,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    /// Current phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u64>,
    /// Counting down
    #[serde(rename = "isRunning", skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
    /// Frozen
    #[serde(rename = "isPaused", skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,
    /// Remaining time as MM:SS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Alert presentation state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertState>,
}

impl ResponseData {
    /// Creates response data from a timer snapshot.
    pub fn from_snapshot(snapshot: &TimerSnapshot) -> Self {
        Self {
            phase: Some(snapshot.phase.as_str().to_string()),
            remaining_seconds: Some(snapshot.remaining_seconds),
            is_running: Some(snapshot.is_running),
            is_paused: Some(snapshot.is_paused),
            display: Some(format_clock(snapshot.remaining_seconds)),
            alert: None,
        }
    }

    /// Attaches the alert state.
    pub fn with_alert(mut self, alert: AlertState) -> Self {
        self.alert = Some(alert);
        self
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }

    /// Returns true for success responses.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // TimerPhase Tests
    // ------------------------------------------------------------------------

    mod timer_phase_tests {
        use super::*;

        #[test]
        fn test_default_is_idle() {
            assert_eq!(TimerPhase::default(), TimerPhase::Idle);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(TimerPhase::Idle.as_str(), "idle");
            assert_eq!(TimerPhase::Running.as_str(), "running");
            assert_eq!(TimerPhase::Paused.as_str(), "paused");
            assert_eq!(TimerPhase::Alerting.as_str(), "alerting");
        }

        #[test]
        fn test_is_active() {
            assert!(!TimerPhase::Idle.is_active());
            assert!(TimerPhase::Running.is_active());
            assert!(TimerPhase::Paused.is_active());
            assert!(!TimerPhase::Alerting.is_active());
        }

        #[test]
        fn test_status_text() {
            assert_eq!(TimerPhase::Idle.status_text(), "Таймер остановлен");
            assert_eq!(TimerPhase::Running.status_text(), "Таймер запущен...");
            assert_eq!(TimerPhase::Paused.status_text(), "Таймер на паузе");
            assert_eq!(TimerPhase::Alerting.status_text(), "⏰ Время истекло!");
        }

        #[test]
        fn test_status_line_after_dismiss() {
            let dismissed = AlertState {
                dismissed: true,
                ..AlertState::default()
            };
            assert_eq!(
                status_line(TimerPhase::Alerting, &dismissed),
                "Уведомление отключено"
            );
            assert_eq!(
                status_line(TimerPhase::Alerting, &AlertState::default()),
                "⏰ Время истекло!"
            );
            assert_eq!(
                status_line(TimerPhase::Idle, &dismissed),
                "Таймер остановлен"
            );
        }

        #[test]
        fn test_pause_label() {
            assert_eq!(pause_label(TimerPhase::Running), "Пауза");
            assert_eq!(pause_label(TimerPhase::Paused), "Возобновить");
            assert_eq!(pause_label(TimerPhase::Idle), "Пауза");
        }

        #[test]
        fn test_serialize_deserialize() {
            let json = serde_json::to_string(&TimerPhase::Alerting).unwrap();
            assert_eq!(json, "\"alerting\"");

            let phase: TimerPhase = serde_json::from_str("\"paused\"").unwrap();
            assert_eq!(phase, TimerPhase::Paused);
        }
    }

    // ------------------------------------------------------------------------
    // TimerState Tests
    // ------------------------------------------------------------------------

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_new_is_idle_zero() {
            let state = TimerState::new();
            assert_eq!(state.phase, TimerPhase::Idle);
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_start_only_from_idle() {
            let mut state = TimerState::new();
            assert!(state.start(10));
            assert_eq!(state.phase, TimerPhase::Running);
            assert_eq!(state.remaining_seconds, 10);

            assert!(!state.start(99));
            assert_eq!(state.remaining_seconds, 10);
        }

        #[test]
        fn test_toggle_pause() {
            let mut state = TimerState::new();
            assert!(!state.toggle_pause());

            state.start(10);
            assert!(state.toggle_pause());
            assert!(state.is_paused());
            assert!(state.toggle_pause());
            assert!(state.is_running());
        }

        #[test]
        fn test_tick_counts_down_and_expires() {
            let mut state = TimerState::new();
            state.start(2);

            assert!(!state.tick());
            assert_eq!(state.remaining_seconds, 1);
            assert!(state.tick());
            assert_eq!(state.phase, TimerPhase::Alerting);
            assert_eq!(state.remaining_seconds, 0);

            // Alerting does not tick again
            assert!(!state.tick());
        }

        #[test]
        fn test_tick_ignored_while_paused() {
            let mut state = TimerState::new();
            state.start(5);
            state.toggle_pause();

            assert!(!state.tick());
            assert_eq!(state.remaining_seconds, 5);
        }

        #[test]
        fn test_adjust_clamps_at_zero_without_expiring() {
            let mut state = TimerState::new();
            state.start(5);

            assert!(state.adjust(-100));
            assert_eq!(state.remaining_seconds, 0);
            assert_eq!(state.phase, TimerPhase::Running);

            // The next tick expires it
            assert!(state.tick());
            assert_eq!(state.phase, TimerPhase::Alerting);
        }

        #[test]
        fn test_adjust_rejected_when_idle_or_alerting() {
            let mut state = TimerState::new();
            assert!(!state.adjust(60));
            assert_eq!(state.remaining_seconds, 0);

            state.start(1);
            state.tick();
            assert!(!state.adjust(60));
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_stop_from_any_phase() {
            let mut state = TimerState::new();
            assert!(!state.stop());

            state.start(3);
            state.toggle_pause();
            assert!(state.stop());
            assert_eq!(state, TimerState::new());
        }

        #[test]
        fn test_snapshot_derives_flags() {
            let mut state = TimerState::new();
            state.start(30);
            let snapshot = state.snapshot();
            assert!(snapshot.is_running);
            assert!(!snapshot.is_paused);
            assert_eq!(snapshot.remaining_seconds, 30);

            state.toggle_pause();
            let snapshot = state.snapshot();
            assert!(!snapshot.is_running);
            assert!(snapshot.is_paused);
        }
    }

    // ------------------------------------------------------------------------
    // Snapshot / AlertState Tests
    // ------------------------------------------------------------------------

    mod snapshot_tests {
        use super::*;

        #[test]
        fn test_snapshot_serializes_camel_case() {
            let snapshot = TimerSnapshot {
                phase: TimerPhase::Running,
                remaining_seconds: 42,
                is_running: true,
                is_paused: false,
            };
            let json = serde_json::to_string(&snapshot).unwrap();
            assert!(json.contains("\"remainingSeconds\":42"));
            assert!(json.contains("\"isRunning\":true"));
            assert!(json.contains("\"isPaused\":false"));
        }

        #[test]
        fn test_alert_state_default_is_quiet() {
            let alert = AlertState::default();
            assert!(!alert.tone_active);
            assert!(!alert.blink_on);
            assert!(!alert.dismissed);

            let json = serde_json::to_string(&alert).unwrap();
            assert!(json.contains("\"toneActive\":false"));
        }
    }

    // ------------------------------------------------------------------------
    // AlertConfig Tests
    // ------------------------------------------------------------------------

    mod alert_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = AlertConfig::default();
            assert_eq!(config.tone_interval_ms, 600);
            assert_eq!(config.blink_interval_ms, 500);
            assert!(config.sound_enabled);
            assert!(config.notifications_enabled);
            assert!(config.sound.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_builders() {
            let config = AlertConfig::default()
                .with_tone_interval_ms(200)
                .with_blink_interval_ms(150);
            assert_eq!(config.tone_interval_ms, 200);
            assert_eq!(config.blink_interval_ms, 150);
        }

        #[test]
        fn test_validate_rejects_out_of_range() {
            assert!(AlertConfig::default()
                .with_tone_interval_ms(50)
                .validate()
                .is_err());
            assert!(AlertConfig::default()
                .with_blink_interval_ms(20_000)
                .validate()
                .is_err());
        }

        #[test]
        fn test_validate_rejects_blank_sound() {
            let config = AlertConfig {
                sound: Some("  ".to_string()),
                ..AlertConfig::default()
            };
            assert!(config.validate().is_err());
        }
    }

    // ------------------------------------------------------------------------
    // IPC Types Tests
    // ------------------------------------------------------------------------

    mod ipc_tests {
        use super::*;

        #[test]
        fn test_start_serialize() {
            let request = IpcRequest::Start {
                duration: "25m".to_string(),
            };
            let json = serde_json::to_string(&request).unwrap();
            assert_eq!(json, r#"{"command":"start","duration":"25m"}"#);
        }

        #[test]
        fn test_pause_resume_wire_name() {
            let json = serde_json::to_string(&IpcRequest::PauseResume).unwrap();
            assert_eq!(json, r#"{"command":"pauseresume"}"#);
        }

        #[test]
        fn test_adjust_deserialize() {
            let request: IpcRequest =
                serde_json::from_str(r#"{"command":"adjust","delta":-60}"#).unwrap();
            assert_eq!(request, IpcRequest::Adjust { delta: -60 });
        }

        #[test]
        fn test_unit_commands_deserialize() {
            for (json, expected) in [
                (r#"{"command":"stop"}"#, IpcRequest::Stop),
                (r#"{"command":"dismiss"}"#, IpcRequest::Dismiss),
                (r#"{"command":"status"}"#, IpcRequest::Status),
                (r#"{"command":"shutdown"}"#, IpcRequest::Shutdown),
            ] {
                let request: IpcRequest = serde_json::from_str(json).unwrap();
                assert_eq!(request, expected);
            }
        }

        #[test]
        fn test_unknown_command_fails() {
            let result: Result<IpcRequest, _> = serde_json::from_str(r#"{"command":"explode"}"#);
            assert!(result.is_err());
        }

        #[test]
        fn test_response_data_from_snapshot() {
            let snapshot = TimerSnapshot {
                phase: TimerPhase::Paused,
                remaining_seconds: 65,
                is_running: false,
                is_paused: true,
            };
            let data = ResponseData::from_snapshot(&snapshot);
            assert_eq!(data.phase.as_deref(), Some("paused"));
            assert_eq!(data.remaining_seconds, Some(65));
            assert_eq!(data.is_paused, Some(true));
            assert_eq!(data.display.as_deref(), Some("01:05"));
            assert!(data.alert.is_none());
        }

        #[test]
        fn test_response_data_skips_none() {
            let json = serde_json::to_string(&ResponseData::default()).unwrap();
            assert_eq!(json, "{}");
        }

        #[test]
        fn test_response_constructors() {
            let ok = IpcResponse::success("ok", None);
            assert!(ok.is_success());
            assert_eq!(ok.status, "success");

            let err = IpcResponse::error("bad");
            assert!(!err.is_success());
            assert_eq!(err.message, "bad");

            let json = serde_json::to_string(&err).unwrap();
            assert!(!json.contains("data"));
        }

        #[test]
        fn test_response_roundtrip_with_alert() {
            let data = ResponseData::from_snapshot(&TimerSnapshot::default()).with_alert(
                AlertState {
                    tone_active: true,
                    blink_on: false,
                    dismissed: false,
                },
            );
            let response = IpcResponse::success("", Some(data.clone()));
            let json = serde_json::to_string(&response).unwrap();
            let back: IpcResponse = serde_json::from_str(&json).unwrap();
            assert_eq!(back.data, Some(data));
        }
    }
}
