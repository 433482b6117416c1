//! Icon and title management for the tray display.
//!
//! This module handles:
//! - Generating the title text shown next to the icon (e.g., "⏱ 25m")
//! - Rendering the RGBA icon in its normal and highlighted colors
//!
//! Everything here is platform-independent and fully testable.

use crate::duration::format_tray_abbrev;
use crate::types::{AlertState, TimerPhase, TimerSnapshot};

// ============================================================================
// Constants
// ============================================================================

/// Glyph while idle or counting down
const RUNNING_GLYPH: &str = "⏱";

/// Glyph while paused
const PAUSED_GLYPH: &str = "⏸";

/// Glyph while the alert is showing
const ALERT_GLYPH: &str = "⏰";

/// Icon edge length in pixels
pub const ICON_SIZE: u32 = 32;

/// Normal icon color
const BASE_COLOR: [u8; 3] = [0x7c, 0x3a, 0xed];

/// Icon color on the "on" frames of the blink
const HIGHLIGHT_COLOR: [u8; 3] = [0xdc, 0x26, 0x26];

// ============================================================================
// IconManager
// ============================================================================

/// Manages icon and title generation for the tray.
#[derive(Debug, Default)]
pub struct IconManager {
    /// Last rendered highlight state
    last_highlight: Option<bool>,
}

impl IconManager {
    /// Creates a new IconManager.
    pub fn new() -> Self {
        Self {
            last_highlight: None,
        }
    }

    /// Generates the title text for display next to the icon.
    ///
    /// Format:
    /// - Idle: "⏱ —"
    /// - Running: "⏱ 25m"
    /// - Paused: "⏸ 25m"
    /// - Alerting: "⏰ —"
    ///
    /// # Examples
    ///
    /// ```
    /// use tray_timer::menubar::icon::IconManager;
    /// use tray_timer::types::{AlertState, TimerState};
    ///
    /// let mut state = TimerState::new();
    /// state.start(5400);
    ///
    /// let manager = IconManager::new();
    /// let title = manager.generate_title(&state.snapshot(), &AlertState::default());
    /// assert_eq!(title, "⏱ 1.5h");
    /// ```
    pub fn generate_title(&self, snapshot: &TimerSnapshot, _alert: &AlertState) -> String {
        format!(
            "{} {}",
            self.glyph(snapshot.phase),
            format_tray_abbrev(snapshot.remaining_seconds)
        )
    }

    /// Returns the glyph for a phase.
    pub fn glyph(&self, phase: TimerPhase) -> &'static str {
        match phase {
            TimerPhase::Idle | TimerPhase::Running => RUNNING_GLYPH,
            TimerPhase::Paused => PAUSED_GLYPH,
            TimerPhase::Alerting => ALERT_GLYPH,
        }
    }

    /// Returns true if the icon should be drawn highlighted.
    pub fn is_highlighted(alert: &AlertState) -> bool {
        alert.blink_on && !alert.dismissed
    }

    /// Checks if the highlight changed since the last call.
    pub fn highlight_changed(&mut self, highlighted: bool) -> bool {
        let changed = self.last_highlight != Some(highlighted);
        if changed {
            self.last_highlight = Some(highlighted);
        }
        changed
    }

    /// Renders the icon as `ICON_SIZE`×`ICON_SIZE` RGBA pixels.
    ///
    /// A filled disc on a transparent background.
    pub fn icon_rgba(highlighted: bool) -> Vec<u8> {
        let [r, g, b] = if highlighted {
            HIGHLIGHT_COLOR
        } else {
            BASE_COLOR
        };
        let size = ICON_SIZE as i64;
        let center = size - 1;
        // Radius in doubled coordinates so the disc is centered between pixels.
        let radius = size - 2;

        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = 2 * x - center;
                let dy = 2 * y - center;
                if dx * dx + dy * dy <= radius * radius {
                    pixels.extend_from_slice(&[r, g, b, 0xff]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }
        pixels
    }
}

// ============================================================================
// Tests
// ============================================================================
