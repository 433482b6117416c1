//! Desktop notification backend built on `notify-rust`.
//!
//! On XDG desktops the notification stays resident and a helper thread waits
//! for the user to click or close it; those actions are queued for
//! `try_recv_action`. On macOS only the send result is observed.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use async_trait::async_trait;
use notify_rust::Notification;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::{NotificationActionEvent, NotificationError, NotificationSender};

/// Application name shown by the notification server.
const APP_NAME: &str = "Tray Timer";

/// Fixed id so a new alert replaces the previous one instead of stacking.
#[cfg(all(unix, not(target_os = "macos")))]
const REPLACE_ID: u32 = 4_711;

/// Notification sender backed by the platform notification service.
pub struct DesktopNotifier {
    available: bool,
    action_tx: Sender<NotificationActionEvent>,
    action_rx: Mutex<Receiver<NotificationActionEvent>>,
}

impl DesktopNotifier {
    /// Creates a notifier, probing whether a notification server is reachable.
    pub fn new() -> Self {
        let available = probe_server();
        if available {
            debug!("Notification server available");
        } else {
            warn!("{}", NotificationError::NotAvailable);
        }
        let (action_tx, action_rx) = mpsc::channel();
        Self {
            available,
            action_tx,
            action_rx: Mutex::new(action_rx),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for DesktopNotifier {
    async fn send_expired(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        if !self.available {
            return Err(NotificationError::NotAvailable);
        }

        let (result_tx, result_rx) = oneshot::channel();
        let action_tx = self.action_tx.clone();
        let title = title.to_string();
        let body = body.to_string();

        tokio::task::spawn_blocking(move || match build_expired(&title, &body).show() {
            Ok(handle) => {
                let _ = result_tx.send(Ok(()));
                wait_for_action(handle, action_tx);
            }
            Err(e) => {
                let _ = result_tx.send(Err(e.to_string()));
            }
        });

        result_rx
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?
            .map_err(NotificationError::SendFailed)
    }

    fn try_recv_action(&self) -> Option<NotificationActionEvent> {
        self.action_rx.lock().ok()?.try_recv().ok()
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn clear_all(&self) {
        close_expired();
    }
}

fn build_expired(title: &str, body: &str) -> Notification {
    let mut notification = Notification::new();
    notification.appname(APP_NAME).summary(title).body(body);

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        notification
            .id(REPLACE_ID)
            .action("default", "OK")
            .urgency(notify_rust::Urgency::Critical)
            .hint(notify_rust::Hint::Resident(true))
            .timeout(notify_rust::Timeout::Never);
    }

    notification
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_server() -> bool {
    notify_rust::get_server_information().is_ok()
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn probe_server() -> bool {
    true
}

#[cfg(all(unix, not(target_os = "macos")))]
fn wait_for_action(handle: notify_rust::NotificationHandle, tx: Sender<NotificationActionEvent>) {
    handle.wait_for_action(|action| {
        let event = match action {
            "__closed" => NotificationActionEvent::Dismiss,
            "default" => NotificationActionEvent::Default,
            _ => NotificationActionEvent::Acknowledged,
        };
        debug!("Notification action: {}", action);
        let _ = tx.send(event);
    });
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn wait_for_action(_handle: notify_rust::NotificationHandle, _tx: Sender<NotificationActionEvent>) {}

/// Replaces the alert with a notification that expires immediately.
#[cfg(all(unix, not(target_os = "macos")))]
fn close_expired() {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        debug!("No runtime to close the notification from");
        return;
    };
    runtime.spawn_blocking(|| {
        let result = Notification::new()
            .appname(APP_NAME)
            .summary(crate::types::STATUS_DISMISSED)
            .id(REPLACE_ID)
            .urgency(notify_rust::Urgency::Low)
            .timeout(notify_rust::Timeout::Milliseconds(1))
            .show();
        if let Err(e) = result {
            debug!("Failed to close notification: {}", e);
        }
    });
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn close_expired() {
    debug!("Delivered notifications are left to the notification center");
}
