//! Daemon bootstrap and main loop.
//!
//! Wires the timer engine, the alert coordinator, the tray and the IPC
//! server together on the current-thread runtime and runs until a shutdown
//! command, a tray "quit" or a termination signal.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, Mutex, Notify};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::menubar::{EventHandler, MenuAction, TrayFeed, TrayIconManager};
use crate::notification::{DesktopNotifier, DialogPrompt};
use crate::sound::{resolve_sound, try_create_player, SoundPlayer, SoundSource};
use crate::types::{AlertConfig, IpcResponse};

use super::alert::{run_alerts, AlertCoordinator};
use super::ipc::{IpcServer, RequestHandler};
use super::timer::{run_ticker, TimerEngine, TimerEvent, TICK_INTERVAL};

/// How often the tray is polled for updates and menu clicks
const TRAY_POLL_INTERVAL: Duration = Duration::from_millis(50);

// ============================================================================
// Daemon
// ============================================================================

/// A fully wired daemon, ready to serve.
pub struct Daemon {
    engine: Arc<Mutex<TimerEngine>>,
    alerts: Arc<Mutex<AlertCoordinator>>,
    handler: RequestHandler,
    shutdown: Arc<Notify>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
}

impl Daemon {
    /// Creates a daemon around an alert coordinator.
    pub fn new(alerts: AlertCoordinator) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        let engine = Arc::new(Mutex::new(TimerEngine::new(event_tx)));
        let alerts = Arc::new(Mutex::new(alerts));
        let shutdown = Arc::new(Notify::new());
        let handler = RequestHandler::new(
            Arc::clone(&engine),
            Arc::clone(&alerts),
            Arc::clone(&shutdown),
        );

        Self {
            engine,
            alerts,
            handler,
            shutdown,
            events,
        }
    }

    /// Creates a daemon backed by the desktop notification server, the
    /// dialog prompt and the default audio device.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_platform(config: AlertConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!(e))
            .context("Invalid alert configuration")?;

        let player = if config.sound_enabled {
            try_create_player().map(|p| p as Arc<dyn SoundPlayer>)
        } else {
            None
        };

        let sound = match config.sound.as_deref() {
            Some(name) => resolve_sound(name).unwrap_or_else(|e| {
                warn!("Sound {:?} not usable, using the tone: {} ({})", name, e, e.suggestion());
                SoundSource::alarm()
            }),
            None => SoundSource::alarm(),
        };
        info!(sound = %sound.name(), "Alert sound selected");

        let alerts = AlertCoordinator::new(
            config,
            Arc::new(DesktopNotifier::new()),
            Arc::new(DialogPrompt::new()),
            player,
        )
        .with_sound(sound);

        Ok(Self::new(alerts))
    }

    /// Returns a handler for requests against this daemon.
    pub fn handler(&self) -> RequestHandler {
        self.handler.clone()
    }

    /// Returns the notifier that stops `run`.
    pub fn shutdown_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Serves requests until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if termination signals cannot be installed.
    pub async fn run(self, server: IpcServer) -> Result<()> {
        let Daemon {
            engine,
            alerts,
            handler,
            shutdown,
            events,
        } = self;

        let ticker = tokio::spawn(run_ticker(Arc::clone(&engine), TICK_INTERVAL));
        let alert_loop = tokio::spawn(run_alerts(Arc::clone(&alerts), events));

        let (tray_tx, tray_rx) = crossbeam_channel::unbounded();
        let timer_feed = engine.lock().await.subscribe();
        let alert_feed = alerts.lock().await.subscribe();
        let feed = tokio::spawn(TrayFeed::new().run(timer_feed, alert_feed, tray_tx));

        let mut tray = TrayIconManager::new(tray_rx);
        if let Err(e) = tray.initialize() {
            warn!("Tray icon unavailable: {:#}", e);
        }
        let mut tray_poll = interval(TRAY_POLL_INTERVAL);
        tray_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let signal = shutdown_signal();
        tokio::pin!(signal);

        info!(socket = %server.socket_path().display(), "Daemon started");

        let result = loop {
            tokio::select! {
                accepted = server.accept() => match accepted {
                    Ok(stream) => {
                        let handler = handler.clone();
                        tokio::spawn(async move {
                            if let Err(e) = handler.serve(stream).await {
                                debug!("Client connection failed: {:#}", e);
                            }
                        });
                    }
                    Err(e) => warn!("{:#}", e),
                },
                _ = tray_poll.tick() => {
                    tray.process_pending_updates();
                    while let Some(action) = tray.poll_menu_action() {
                        apply_menu_action(&handler, tray.event_handler(), action).await;
                    }
                }
                _ = shutdown.notified() => break Ok(()),
                received = &mut signal => break received,
            }
        };

        alerts.lock().await.silence();
        tray.shutdown();
        ticker.abort();
        alert_loop.abort();
        feed.abort();

        info!("Daemon stopped");
        result
    }
}

/// Runs a tray menu action through the same handler as IPC requests.
pub async fn apply_menu_action(
    handler: &RequestHandler,
    events: &EventHandler,
    action: MenuAction,
) -> IpcResponse {
    let response = handler.handle(action.to_request()).await;
    events.log_action_result(&action, response.is_success(), &response.message);
    response
}

/// Binds the socket and runs the platform-backed daemon.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the socket cannot be
/// bound or signal handlers cannot be installed.
pub async fn run_daemon(socket_path: &Path, config: AlertConfig) -> Result<()> {
    let daemon = Daemon::with_platform(config)?;
    let server = IpcServer::new(socket_path)?;
    daemon.run(server).await
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).context("Failed to listen for SIGINT")?;
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;
    tokio::select! {
        _ = sigint.recv() => info!("Received SIGINT"),
        _ = sigterm.recv() => info!("Received SIGTERM"),
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixStream;

    use crate::notification::{MockNotificationSender, MockPrompt};
    use crate::sound::MockSoundPlayer;
    use crate::types::IpcRequest;

    fn mock_daemon() -> Daemon {
        Daemon::new(AlertCoordinator::new(
            AlertConfig::default(),
            Arc::new(MockNotificationSender::new()),
            Arc::new(MockPrompt::new()),
            Some(Arc::new(MockSoundPlayer::new()) as Arc<dyn SoundPlayer>),
        ))
    }

    async fn exchange(path: &PathBuf, request: &IpcRequest) -> IpcResponse {
        let mut stream = UnixStream::connect(path).await.unwrap();
        stream
            .write_all(&serde_json::to_vec(request).unwrap())
            .await
            .unwrap();
        stream.shutdown().await.unwrap();
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await.unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_invalid_config_rejected() {
            let config = AlertConfig::default().with_tone_interval_ms(1);
            assert!(Daemon::with_platform(config).is_err());
        }
    }

    mod menu_action_tests {
        use super::*;

        #[tokio::test]
        async fn test_preset_starts_timer() {
            let daemon = mock_daemon();
            let handler = daemon.handler();

            let response =
                apply_menu_action(&handler, &EventHandler::new(), MenuAction::StartPreset("5m"))
                    .await;

            assert!(response.is_success());
            let data = response.data.unwrap();
            assert_eq!(data.phase.as_deref(), Some("running"));
            assert_eq!(data.remaining_seconds, Some(300));
        }

        #[tokio::test]
        async fn test_quit_requests_shutdown() {
            let daemon = mock_daemon();
            let handler = daemon.handler();
            let shutdown = daemon.shutdown_handle();

            apply_menu_action(&handler, &EventHandler::new(), MenuAction::Quit).await;

            // The stored permit completes immediately
            tokio::time::timeout(Duration::from_secs(1), shutdown.notified())
                .await
                .unwrap();
        }
    }

    mod run_tests {
        use super::*;

        #[tokio::test]
        async fn test_serves_until_shutdown_command() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("daemon.sock");
            let server = IpcServer::new(&path).unwrap();

            let client = async {
                let response = exchange(
                    &path,
                    &IpcRequest::Start {
                        duration: "10m".to_string(),
                    },
                )
                .await;
                assert!(response.is_success());

                let status = exchange(&path, &IpcRequest::Status).await;
                assert_eq!(status.data.unwrap().phase.as_deref(), Some("running"));

                let response = exchange(&path, &IpcRequest::Shutdown).await;
                assert!(response.is_success());
            };

            let (result, ()) = tokio::time::timeout(
                Duration::from_secs(5),
                async { tokio::join!(mock_daemon().run(server), client) },
            )
            .await
            .unwrap();

            assert!(result.is_ok());
            assert!(!path.exists());
        }
    }
}
