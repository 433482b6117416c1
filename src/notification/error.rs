//! Notification system error types.
//!
//! This module defines the error types for desktop notifications and the
//! blocking acknowledgment prompt.

use thiserror::Error;

/// Errors that can occur while presenting an expiry alert.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Failed to send a notification.
    #[error("Не удалось отправить уведомление: {0}")]
    SendFailed(String),

    /// No notification server is reachable.
    #[error("Сервер уведомлений недоступен")]
    NotAvailable,

    /// No dialog tool is installed for the acknowledgment prompt.
    #[error("Программа для диалога не найдена: {0}")]
    PromptUnavailable(String),

    /// The acknowledgment prompt could not be shown.
    #[error("Не удалось показать диалог: {0}")]
    PromptFailed(String),
}

impl NotificationError {
    /// Returns true if the error means the backend is missing entirely,
    /// as opposed to a single failed attempt.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotAvailable | Self::PromptUnavailable(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => "Проверьте настройки уведомлений системы",
            Self::NotAvailable => "Запустите демон уведомлений (например, dunst или mako)",
            Self::PromptUnavailable(_) => "Установите zenity для диалоговых окон",
            Self::PromptFailed(_) => "Проверьте, что доступен графический сеанс",
        }
    }
}
