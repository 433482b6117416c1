//! Tray Timer Library
//!
//! This library provides the core functionality for the tray countdown timer.
//! It includes:
//! - Duration text parsing and formatting
//! - Timer engine with a four-phase state machine and snapshot stream
//! - Expiry alerts: notification, prompt fallback, repeating tone, blinking icon
//! - IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities
//! - Tray icon UI (macOS menu bar)
//! - Sound playback for the alert tone

pub mod cli;
pub mod daemon;
pub mod duration;
pub mod menubar;
pub mod notification;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    AlertConfig, AlertState, IpcRequest, IpcResponse, ResponseData, TimerPhase, TimerSnapshot,
    TimerState,
};

pub use daemon::{AlertCoordinator, CommandOutcome, Daemon, Subscription, TimerEngine, TimerEvent};

pub use duration::ParseError;

// Re-export notification types
pub use notification::{
    AcknowledgePrompt, DesktopNotifier, DialogPrompt, MockNotificationSender, MockPrompt,
    NotificationActionEvent, NotificationError, NotificationSender,
};

// Re-export menubar types
pub use menubar::{
    EventHandler, IconManager, MenuAction, MenuBuilder, MenuConfig, MenuItemConfig, TrayFeed,
    TrayIconManager, TrayUpdate,
};

// Re-export sound types
pub use sound::{
    discover_system_sounds, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer,
    SoundSource,
};
