//! Event handling for tray menu interactions.
//!
//! This module handles:
//! - Menu actions and their stable item ids
//! - Translating actions into the same requests the IPC socket accepts
//! - Updates sent to the tray icon
//!
//! Everything here is platform-independent. Native event delivery happens in
//! the platform-specific code of `TrayIconManager`.

use std::fmt;

use crate::duration::{format_canonical, QUICK_PRESETS};
use crate::types::IpcRequest;

use super::menu::MenuConfig;

// ============================================================================
// MenuAction
// ============================================================================

/// Actions that can be triggered from the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Start a countdown from a quick preset
    StartPreset(&'static str),
    /// Toggle pause
    PauseResume,
    /// Add (or subtract) seconds
    Adjust(i64),
    /// Stop the timer
    Stop,
    /// Acknowledge the expiry alert
    Dismiss,
    /// Quit the daemon
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl MenuAction {
    /// Returns the stable menu item id for this action.
    pub fn id(&self) -> String {
        match self {
            MenuAction::StartPreset(preset) => format!("preset:{}", preset),
            MenuAction::PauseResume => "pause".to_string(),
            MenuAction::Adjust(delta) => format!("adjust:{}", delta),
            MenuAction::Stop => "stop".to_string(),
            MenuAction::Dismiss => "dismiss".to_string(),
            MenuAction::Quit => "quit".to_string(),
        }
    }

    /// Parses a menu item id back into an action.
    ///
    /// Presets must be one of the known quick presets.
    pub fn from_id(id: &str) -> Option<Self> {
        if let Some(preset) = id.strip_prefix("preset:") {
            return QUICK_PRESETS
                .iter()
                .copied()
                .find(|p| *p == preset)
                .map(MenuAction::StartPreset);
        }
        if let Some(delta) = id.strip_prefix("adjust:") {
            return delta.parse().ok().map(MenuAction::Adjust);
        }
        match id {
            "pause" => Some(MenuAction::PauseResume),
            "stop" => Some(MenuAction::Stop),
            "dismiss" => Some(MenuAction::Dismiss),
            "quit" => Some(MenuAction::Quit),
            _ => None,
        }
    }

    /// Converts the action into the equivalent IPC request.
    pub fn to_request(&self) -> IpcRequest {
        match self {
            MenuAction::StartPreset(preset) => IpcRequest::Start {
                duration: (*preset).to_string(),
            },
            MenuAction::PauseResume => IpcRequest::PauseResume,
            MenuAction::Adjust(delta) => IpcRequest::Adjust { delta: *delta },
            MenuAction::Stop => IpcRequest::Stop,
            MenuAction::Dismiss => IpcRequest::Dismiss,
            MenuAction::Quit => IpcRequest::Shutdown,
        }
    }
}

/// Label for an adjust step, e.g. `"+5m"` or `"-1h"`.
pub fn step_label(delta: i64) -> String {
    let sign = if delta < 0 { '-' } else { '+' };
    format!("{}{}", sign, format_canonical(delta.unsigned_abs()))
}

// ============================================================================
// EventHandler
// ============================================================================

/// Converts native menu clicks into actions.
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    /// Creates a new EventHandler.
    pub fn new() -> Self {
        Self
    }

    /// Processes a menu item click and returns the corresponding action.
    ///
    /// Returns `None` for ids that do not trigger an action.
    pub fn handle_click(&self, item_id: &str) -> Option<MenuAction> {
        let action = MenuAction::from_id(item_id);
        match action {
            Some(ref action) => tracing::info!(action = %action, "Menu action received"),
            None => tracing::debug!(id = item_id, "Ignoring menu item"),
        }
        action
    }

    /// Logs the result of an action execution.
    pub fn log_action_result(&self, action: &MenuAction, success: bool, message: &str) {
        if success {
            tracing::debug!(action = %action, "{}", message);
        } else {
            tracing::warn!(action = %action, "{}", message);
        }
    }
}

// ============================================================================
// TrayUpdate
// ============================================================================

/// Updates sent to the tray icon.
///
/// Sent over crossbeam-channel from the async side to the tray, which polls
/// from the thread that owns the native icon.
#[derive(Debug, Clone, PartialEq)]
pub enum TrayUpdate {
    /// Update the title text next to the icon
    SetTitle(String),
    /// Update the hover tooltip
    SetTooltip(String),
    /// Switch between the normal and the highlighted icon
    SetIcon {
        /// Show the highlighted (alert) icon
        highlighted: bool,
    },
    /// Replace the menu
    RebuildMenu(MenuConfig),
    /// Shutdown the tray icon
    Shutdown,
}

// ============================================================================
// Tests
// ============================================================================
