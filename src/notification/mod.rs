//! Expiry notification system.
//!
//! This module provides the user-facing side of an expiry alert:
//!
//! - `NotificationSender`: desktop notification with click/close feedback
//! - `DesktopNotifier`: `notify-rust` backed sender (XDG and macOS)
//! - `AcknowledgePrompt`: blocking dialog used when no notification can be shown
//! - Mocks of both for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use tray_timer::notification::{DesktopNotifier, NotificationSender};
//!
//! let notifier = DesktopNotifier::new();
//! notifier.send_expired("⏰ Время истекло!", "Таймер завершил отсчет.").await?;
//!
//! while let Some(event) = notifier.try_recv_action() {
//!     println!("user reacted: {:?}", event);
//! }
//! ```

mod desktop;
pub mod error;
pub mod prompt;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

pub use self::desktop::DesktopNotifier;
pub use self::error::NotificationError;
pub use self::prompt::{AcknowledgePrompt, DialogPrompt, MockPrompt};

/// User reaction to a delivered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationActionEvent {
    /// Notification body clicked
    Default,
    /// Notification closed or swiped away
    Dismiss,
    /// Any other action button
    Acknowledged,
}

/// Sends expiry notifications and reports user reactions to them.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Shows the expiry notification.
    async fn send_expired(&self, title: &str, body: &str) -> Result<(), NotificationError>;
    /// Returns the next queued user reaction, if any.
    fn try_recv_action(&self) -> Option<NotificationActionEvent>;
    /// Returns true if notifications can be delivered.
    fn is_available(&self) -> bool;
    /// Removes the expiry notification from screen.
    fn clear_all(&self);
}

// ============================================================================
// MockNotificationSender
// ============================================================================

#[derive(Debug)]
pub struct MockNotificationSender {
    notifications: Mutex<Vec<(String, String)>>,
    action_events: Mutex<Vec<NotificationActionEvent>>,
    available: AtomicBool,
    should_fail: AtomicBool,
    clear_count: AtomicUsize,
}

impl Default for MockNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            action_events: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
            clear_count: AtomicUsize::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn inject_action_event(&self, event: NotificationActionEvent) {
        if let Ok(mut events) = self.action_events.lock() {
            events.push(event);
        }
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<(String, String)> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().map(|n| n.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clear_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_expired(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push((title.to_string(), body.to_string()));
        }
        Ok(())
    }

    fn try_recv_action(&self) -> Option<NotificationActionEvent> {
        let mut events = self.action_events.lock().ok()?;
        if events.is_empty() {
            None
        } else {
            Some(events.remove(0))
        }
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn clear_all(&self) {
        self.clear_count.fetch_add(1, Ordering::SeqCst);
    }
}
