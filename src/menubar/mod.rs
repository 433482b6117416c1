//! Tray UI module for the countdown timer.
//!
//! This module provides:
//! - Tray icon management (macOS menu bar)
//! - Compact remaining-time display (e.g., "⏱ 25m")
//! - Dropdown menu with presets, pause/resume, adjust, stop and dismiss
//! - Event handling for menu interactions
//!
//! # Architecture
//!
//! The module is split into platform-independent and platform-specific parts:
//!
//! - `icon.rs`: Title text and icon pixels (platform-independent, fully testable)
//! - `menu.rs`: Menu configuration (platform-independent, fully testable)
//! - `event.rs`: Actions and tray updates (platform-independent, fully testable)
//! - `mod.rs`: `TrayFeed` (async side) and `TrayIconManager` (platform-specific on macOS)
//!
//! # Usage
//!
//! `TrayFeed` turns timer snapshots and alert state into `TrayUpdate`s and
//! sends them over a crossbeam channel to the `TrayIconManager`, which
//! applies them to the native icon and reports menu clicks back as
//! `MenuAction`s.
//!
//! ```ignore
//! use tray_timer::menubar::{TrayFeed, TrayIconManager};
//! use crossbeam_channel::unbounded;
//!
//! let (tx, rx) = unbounded();
//! let mut manager = TrayIconManager::new(rx);
//! manager.initialize()?;
//!
//! tokio::spawn(TrayFeed::new().run(engine.subscribe(), alerts.subscribe(), tx));
//! ```

pub mod event;
pub mod icon;
pub mod menu;

// Re-export main types
pub use event::{EventHandler, MenuAction, TrayUpdate};
pub use icon::IconManager;
pub use menu::{MenuBuilder, MenuConfig, MenuItemConfig};

use crossbeam_channel::{Receiver, Sender};
use tokio::sync::watch;

use crate::daemon::timer::Subscription;
use crate::types::{status_line, AlertState, TimerSnapshot};

// ============================================================================
// TrayFeed
// ============================================================================

/// Converts timer and alert state into tray updates.
///
/// Only differences from the previously sent view are emitted, so a tick
/// that leaves the title unchanged (e.g. 1500 → 1499 both read "25m")
/// sends nothing.
#[derive(Debug, Default)]
pub struct TrayFeed {
    icon_manager: IconManager,
    menu_builder: MenuBuilder,
    last_title: Option<String>,
    last_tooltip: Option<String>,
    last_menu: Option<MenuConfig>,
}

impl TrayFeed {
    /// Creates a feed that has not sent anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the updates needed to bring the tray to the given state.
    pub fn updates(&mut self, snapshot: &TimerSnapshot, alert: &AlertState) -> Vec<TrayUpdate> {
        let mut updates = Vec::new();

        let title = self.icon_manager.generate_title(snapshot, alert);
        if self.last_title.as_ref() != Some(&title) {
            self.last_title = Some(title.clone());
            updates.push(TrayUpdate::SetTitle(title));
        }

        let tooltip = status_line(snapshot.phase, alert).to_string();
        if self.last_tooltip.as_ref() != Some(&tooltip) {
            self.last_tooltip = Some(tooltip.clone());
            updates.push(TrayUpdate::SetTooltip(tooltip));
        }

        let highlighted = IconManager::is_highlighted(alert);
        if self.icon_manager.highlight_changed(highlighted) {
            updates.push(TrayUpdate::SetIcon { highlighted });
        }

        let menu = self.menu_builder.build(snapshot, alert);
        if self.last_menu.as_ref() != Some(&menu) {
            self.last_menu = Some(menu.clone());
            updates.push(TrayUpdate::RebuildMenu(menu));
        }

        updates
    }

    /// Forwards updates until the engine, the coordinator or the tray goes away.
    pub async fn run(
        mut self,
        mut timer: Subscription,
        mut alerts: watch::Receiver<AlertState>,
        tx: Sender<TrayUpdate>,
    ) {
        let Some(mut snapshot) = timer.recv().await else {
            return;
        };
        let mut alert = *alerts.borrow_and_update();

        loop {
            for update in self.updates(&snapshot, &alert) {
                if tx.send(update).is_err() {
                    tracing::debug!("Tray update channel closed");
                    return;
                }
            }

            tokio::select! {
                next = timer.recv() => match next {
                    Some(next) => snapshot = next,
                    None => break,
                },
                changed = alerts.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    alert = *alerts.borrow_and_update();
                }
            }
        }

        let _ = tx.send(TrayUpdate::Shutdown);
    }
}

// ============================================================================
// TrayIconManager
// ============================================================================

/// Manages the native tray icon.
///
/// On macOS, it owns the tray-icon instance and must live on the main thread.
/// On other platforms, it operates in a no-op mode.
pub struct TrayIconManager {
    /// Event handler for menu clicks
    event_handler: EventHandler,
    /// Channel for receiving updates from the feed
    update_rx: Receiver<TrayUpdate>,
    /// Whether the manager is initialized
    initialized: bool,
    /// Last title applied (kept for inspection on every platform)
    title: String,
    /// Platform-specific tray icon instance (macOS only)
    #[cfg(target_os = "macos")]
    tray_icon: Option<tray_icon::TrayIcon>,
}

impl TrayIconManager {
    /// Creates a new TrayIconManager.
    ///
    /// On macOS, the actual tray icon is not created until `initialize()` is
    /// called.
    pub fn new(update_rx: Receiver<TrayUpdate>) -> Self {
        Self {
            event_handler: EventHandler::new(),
            update_rx,
            initialized: false,
            title: String::new(),
            #[cfg(target_os = "macos")]
            tray_icon: None,
        }
    }

    /// Returns whether the manager is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the last title applied.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Applies every queued update.
    ///
    /// Returns the number of updates processed.
    pub fn process_pending_updates(&mut self) -> usize {
        let mut processed = 0;
        while self.process_pending_update() {
            processed += 1;
        }
        processed
    }

    /// Processes a pending update from the channel.
    ///
    /// Returns `true` if an update was processed, `false` if the channel was empty.
    pub fn process_pending_update(&mut self) -> bool {
        match self.update_rx.try_recv() {
            Ok(update) => {
                self.handle_update(update);
                true
            }
            Err(crossbeam_channel::TryRecvError::Empty) => false,
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                if self.initialized {
                    tracing::warn!("Tray update channel disconnected");
                    self.shutdown();
                }
                false
            }
        }
    }

    /// Handles an update from the feed.
    fn handle_update(&mut self, update: TrayUpdate) {
        match update {
            TrayUpdate::SetTitle(title) => {
                tracing::debug!(title = %title, "Tray title updated");
                #[cfg(target_os = "macos")]
                if let Some(ref tray_icon) = self.tray_icon {
                    tray_icon.set_title(Some(&title));
                }
                self.title = title;
            }
            TrayUpdate::SetTooltip(tooltip) => {
                #[cfg(target_os = "macos")]
                if let Some(ref tray_icon) = self.tray_icon {
                    if let Err(e) = tray_icon.set_tooltip(Some(&tooltip)) {
                        tracing::warn!("Failed to set tray tooltip: {}", e);
                    }
                }
                #[cfg(not(target_os = "macos"))]
                let _ = tooltip;
            }
            TrayUpdate::SetIcon { highlighted } => {
                #[cfg(target_os = "macos")]
                if let Some(ref tray_icon) = self.tray_icon {
                    match native_icon(highlighted) {
                        Ok(icon) => {
                            if let Err(e) = tray_icon.set_icon(Some(icon)) {
                                tracing::warn!("Failed to set tray icon: {}", e);
                            }
                        }
                        Err(e) => tracing::warn!("Failed to render tray icon: {}", e),
                    }
                }
                #[cfg(not(target_os = "macos"))]
                let _ = highlighted;
            }
            TrayUpdate::RebuildMenu(config) => {
                tracing::debug!("Rebuilding tray menu");
                #[cfg(target_os = "macos")]
                if let Some(ref tray_icon) = self.tray_icon {
                    match build_native_menu(&config) {
                        Ok(menu) => tray_icon.set_menu(Some(Box::new(menu))),
                        Err(e) => tracing::warn!("Failed to rebuild tray menu: {}", e),
                    }
                }
                #[cfg(not(target_os = "macos"))]
                let _ = config;
            }
            TrayUpdate::Shutdown => {
                tracing::info!("Shutting down tray icon");
                self.shutdown();
            }
        }
    }

    /// Returns the next menu click, if any.
    #[cfg(target_os = "macos")]
    pub fn poll_menu_action(&self) -> Option<MenuAction> {
        let event = tray_icon::menu::MenuEvent::receiver().try_recv().ok()?;
        self.event_handler.handle_click(event.id.0.as_str())
    }

    /// Returns the next menu click (non-macOS, never any).
    #[cfg(not(target_os = "macos"))]
    pub fn poll_menu_action(&self) -> Option<MenuAction> {
        None
    }

    /// Returns the event handler used for menu clicks.
    pub fn event_handler(&self) -> &EventHandler {
        &self.event_handler
    }

    /// Shuts down the tray icon.
    pub fn shutdown(&mut self) {
        self.initialized = false;
        #[cfg(target_os = "macos")]
        {
            self.tray_icon = None;
        }
    }

    /// Initializes the tray icon (macOS only).
    ///
    /// This must be called from the main thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the tray icon cannot be created.
    #[cfg(target_os = "macos")]
    pub fn initialize(&mut self) -> anyhow::Result<()> {
        use anyhow::Context;
        use tray_icon::TrayIconBuilder;

        let snapshot = TimerSnapshot::default();
        let alert = AlertState::default();
        let title = IconManager::new().generate_title(&snapshot, &alert);
        let menu = build_native_menu(&MenuBuilder::new().build(&snapshot, &alert))?;

        let tray_icon = TrayIconBuilder::new()
            .with_title(&title)
            .with_icon(native_icon(false)?)
            .with_menu(Box::new(menu))
            .with_tooltip(status_line(snapshot.phase, &alert))
            .build()
            .context("Failed to create tray icon")?;

        self.tray_icon = Some(tray_icon);
        self.title = title;
        self.initialized = true;

        tracing::info!("Tray icon initialized");
        Ok(())
    }

    /// Initializes the tray icon (non-macOS, no-op).
    #[cfg(not(target_os = "macos"))]
    pub fn initialize(&mut self) -> anyhow::Result<()> {
        tracing::warn!("The tray icon is only supported on macOS");
        self.initialized = true;
        Ok(())
    }
}

impl std::fmt::Debug for TrayIconManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayIconManager")
            .field("initialized", &self.initialized)
            .field("title", &self.title)
            .field("event_handler", &self.event_handler)
            .finish_non_exhaustive()
    }
}

/// Renders the tray icon image.
#[cfg(target_os = "macos")]
fn native_icon(highlighted: bool) -> anyhow::Result<tray_icon::Icon> {
    let size = icon::ICON_SIZE;
    tray_icon::Icon::from_rgba(IconManager::icon_rgba(highlighted), size, size)
        .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Builds a native menu from the configuration (macOS only).
#[cfg(target_os = "macos")]
fn build_native_menu(config: &MenuConfig) -> anyhow::Result<tray_icon::menu::Menu> {
    use tray_icon::menu::{Menu, PredefinedMenuItem, Submenu};

    let menu = Menu::new();

    menu.append(&native_item(&config.title))?;
    menu.append(&native_item(&config.status))?;
    menu.append(&PredefinedMenuItem::separator())?;

    let presets = Submenu::new(&config.presets_label, true);
    for item in &config.presets {
        presets.append(&native_item(item))?;
    }
    menu.append(&presets)?;

    menu.append(&native_item(&config.pause))?;

    let adjust = Submenu::new(&config.adjust_label, true);
    for item in &config.adjust {
        adjust.append(&native_item(item))?;
    }
    menu.append(&adjust)?;

    menu.append(&native_item(&config.stop))?;
    menu.append(&native_item(&config.dismiss))?;
    menu.append(&PredefinedMenuItem::separator())?;
    menu.append(&native_item(&config.quit))?;

    Ok(menu)
}

#[cfg(target_os = "macos")]
fn native_item(item: &MenuItemConfig) -> tray_icon::menu::MenuItem {
    use tray_icon::menu::MenuItem;

    match item.action {
        Some(action) => MenuItem::with_id(action.id(), &item.text, item.enabled, None),
        None => MenuItem::new(&item.text, item.enabled, None),
    }
}

// ============================================================================
// Tests
// ============================================================================
