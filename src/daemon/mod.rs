//! Daemon module for the tray timer.
//!
//! This module contains the core daemon functionality:
//! - `timer`: Countdown engine with state transitions and the tick loop
//! - `alert`: Expiry alert coordination (tone, blink, notification)
//! - `ipc`: Unix socket server and request dispatch
//! - `runtime`: Bootstrap and main loop

pub mod alert;
pub mod ipc;
pub mod runtime;
pub mod timer;

pub use alert::{run_alerts, AlertCoordinator, ExpiryNotice};
pub use ipc::{default_socket_path, IpcServer, RequestHandler};
pub use runtime::{run_daemon, Daemon};
pub use timer::{run_ticker, CommandOutcome, Subscription, TimerEngine, TimerEvent};
