//! Display utilities for the tray timer CLI.
//!
//! This module provides formatted output for:
//! - Command results
//! - Error messages
//! - Status display
//!
//! Each `show_*` prints the lines built by the matching `*_lines` function,
//! so the wording can be tested without capturing stdout.

use crate::duration::format_clock;
use crate::types::{IpcResponse, ResponseData};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the result of a start command.
    pub fn show_start_success(response: &IpcResponse) {
        Self::print(Self::command_lines("▶", response));
    }

    /// Shows the result of a stop command.
    pub fn show_stop_success(response: &IpcResponse) {
        Self::print(vec![format!("■ {}", response.message)]);
    }

    /// Shows the result of a pause/resume toggle.
    pub fn show_pause_success(response: &IpcResponse) {
        let marker = match Self::phase(response) {
            Some("paused") => "⏸",
            _ => "▶",
        };
        Self::print(Self::command_lines(marker, response));
    }

    /// Shows the result of an adjust command.
    pub fn show_adjust_success(response: &IpcResponse) {
        Self::print(vec![format!("± {}", response.message)]);
    }

    /// Shows the result of a dismiss command.
    pub fn show_dismiss_success(response: &IpcResponse) {
        Self::print(vec![format!("🔕 {}", response.message)]);
    }

    /// Shows the result of a shutdown command.
    pub fn show_shutdown_success(response: &IpcResponse) {
        Self::print(vec![response.message.clone()]);
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        Self::print(Self::status_lines(response));
    }

    /// Shows the nudged duration input.
    pub fn show_nudge(current: &str, result: Option<&str>) {
        match result {
            Some(updated) => println!("{}", updated),
            None => println!("{}", current),
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Ошибка: {}", message);
    }

    /// Lines for a command result: the message, then the remaining time
    /// while a countdown is active.
    pub fn command_lines(marker: &str, response: &IpcResponse) -> Vec<String> {
        let mut lines = vec![format!("{} {}", marker, response.message)];
        if let Some(data) = &response.data {
            if Self::is_active(data) {
                if let Some(remaining) = data.remaining_seconds {
                    lines.push(format!("  Осталось: {}", format_clock(remaining)));
                }
            }
        }
        lines
    }

    /// Lines for the status command.
    pub fn status_lines(response: &IpcResponse) -> Vec<String> {
        let mut lines = vec![
            "Статус таймера".to_string(),
            "─────────────────────────────".to_string(),
        ];

        let Some(data) = &response.data else {
            lines.push("Демон не вернул данные".to_string());
            return lines;
        };

        lines.push(format!("Состояние: {}", response.message));
        if Self::is_active(data) {
            if let Some(remaining) = data.remaining_seconds {
                lines.push(format!("Осталось: {}", format_clock(remaining)));
            }
        }
        if let Some(alert) = &data.alert {
            if alert.tone_active {
                lines.push("Сигнал: звучит".to_string());
            }
        }
        lines
    }

    fn phase(response: &IpcResponse) -> Option<&str> {
        response.data.as_ref().and_then(|data| data.phase.as_deref())
    }

    fn is_active(data: &ResponseData) -> bool {
        matches!(data.phase.as_deref(), Some("running") | Some("paused"))
    }

    fn print(lines: Vec<String>) {
        for line in lines {
            println!("{}", line);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
