//! Menu building and item state management for the tray.
//!
//! This module handles:
//! - Menu item configuration and state
//! - Determining which menu items should be enabled/disabled based on timer state
//!
//! The configuration logic is platform-independent and fully testable.
//! Actual menu creation using tray-icon is done in the platform-specific code.

use crate::duration::{ADJUST_STEPS, QUICK_PRESETS};
use crate::types::{pause_label, status_line, AlertState, TimerPhase, TimerSnapshot};

use super::event::{step_label, MenuAction};

/// Application name shown at the top of the menu
const APP_TITLE: &str = "Таймер";

// ============================================================================
// MenuItemConfig
// ============================================================================

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemConfig {
    /// Display text for the menu item
    pub text: String,
    /// Whether the menu item is enabled (clickable)
    pub enabled: bool,
    /// Action triggered by a click; `None` for informational items
    pub action: Option<MenuAction>,
}

impl MenuItemConfig {
    /// Creates an informational (disabled, action-less) item.
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: false,
            action: None,
        }
    }

    /// Creates an item that triggers `action` when clicked.
    pub fn action(text: impl Into<String>, enabled: bool, action: MenuAction) -> Self {
        Self {
            text: text.into(),
            enabled,
            action: Some(action),
        }
    }
}

// ============================================================================
// MenuConfig
// ============================================================================

/// Complete menu configuration based on current timer and alert state.
///
/// Independent of the remaining time; it only changes with the phase or the
/// alert acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    /// Title item (always disabled, shows app name)
    pub title: MenuItemConfig,
    /// Status line (always disabled)
    pub status: MenuItemConfig,
    /// Submenu label for the presets
    pub presets_label: String,
    /// Quick start presets
    pub presets: Vec<MenuItemConfig>,
    /// Pause/resume toggle
    pub pause: MenuItemConfig,
    /// Submenu label for the adjust steps
    pub adjust_label: String,
    /// Adjust steps
    pub adjust: Vec<MenuItemConfig>,
    /// Stop button
    pub stop: MenuItemConfig,
    /// Alert acknowledgement
    pub dismiss: MenuItemConfig,
    /// Quit button (always enabled)
    pub quit: MenuItemConfig,
}

impl MenuConfig {
    /// Iterates over every actionable item in display order.
    pub fn actions(&self) -> impl Iterator<Item = &MenuItemConfig> {
        self.presets
            .iter()
            .chain(std::iter::once(&self.pause))
            .chain(self.adjust.iter())
            .chain([&self.stop, &self.dismiss, &self.quit])
    }

    /// Looks up the item bound to `action`.
    pub fn find(&self, action: &MenuAction) -> Option<&MenuItemConfig> {
        self.actions().find(|item| item.action.as_ref() == Some(action))
    }
}

// ============================================================================
// MenuBuilder
// ============================================================================

/// Builds menu configuration based on timer state.
#[derive(Debug, Default)]
pub struct MenuBuilder;

impl MenuBuilder {
    /// Creates a new MenuBuilder.
    pub fn new() -> Self {
        Self
    }

    /// Builds a complete menu configuration.
    ///
    /// - Presets are available when no countdown is in progress
    /// - Pause/resume and the adjust steps need an active countdown
    /// - Stop is available in every phase but Idle
    /// - Dismiss needs an unacknowledged alert
    pub fn build(&self, snapshot: &TimerSnapshot, alert: &AlertState) -> MenuConfig {
        let phase = snapshot.phase;
        let active = phase.is_active();

        let presets = QUICK_PRESETS
            .iter()
            .map(|preset| MenuItemConfig::action(*preset, !active, MenuAction::StartPreset(*preset)))
            .collect();

        let adjust = ADJUST_STEPS
            .iter()
            .map(|delta| MenuItemConfig::action(step_label(*delta), active, MenuAction::Adjust(*delta)))
            .collect();

        MenuConfig {
            title: MenuItemConfig::label(APP_TITLE),
            status: MenuItemConfig::label(status_line(phase, alert)),
            presets_label: "Быстрый старт".to_string(),
            presets,
            pause: MenuItemConfig::action(pause_label(phase), active, MenuAction::PauseResume),
            adjust_label: "Изменить время".to_string(),
            adjust,
            stop: MenuItemConfig::action("Стоп", phase != TimerPhase::Idle, MenuAction::Stop),
            dismiss: MenuItemConfig::action(
                "Отключить сигнал",
                phase == TimerPhase::Alerting && !alert.dismissed,
                MenuAction::Dismiss,
            ),
            quit: MenuItemConfig::action("Выход", true, MenuAction::Quit),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
