//! IPC Server for the tray timer.
//!
//! This module provides Unix Domain Socket IPC functionality:
//! - Server that listens on a Unix socket
//! - Request/response handling for timer and alert commands
//! - Integration with TimerEngine and AlertCoordinator

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{Mutex, Notify};
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use crate::duration::{self, format_canonical, format_clock};
use crate::types::{
    status_line, IpcRequest, IpcResponse, ResponseData, TimerPhase, TimerSnapshot,
    STATUS_DISMISSED,
};

use super::alert::AlertCoordinator;
use super::timer::{CommandOutcome, TimerEngine};

// ============================================================================
// Constants
// ============================================================================

/// Socket location relative to the runtime (or home) directory
const SOCKET_DIR: &str = "tray-timer";
const SOCKET_FILE: &str = "tray-timer.sock";

/// Maximum request size in bytes (4KB)
const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

/// Returns the default socket path.
///
/// `$XDG_RUNTIME_DIR/tray-timer/tray-timer.sock` when a runtime directory
/// exists, otherwise `~/.tray-timer/tray-timer.sock`.
///
/// # Errors
///
/// Returns an error if neither directory can be determined.
pub fn default_socket_path() -> Result<PathBuf> {
    if let Some(runtime) = dirs::runtime_dir() {
        return Ok(runtime.join(SOCKET_DIR).join(SOCKET_FILE));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(format!(".{}", SOCKET_DIR)).join(SOCKET_FILE))
}

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Read error
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,

    /// Request too large
    #[error("Request too large (max {MAX_REQUEST_SIZE} bytes)")]
    RequestTooLarge,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
pub struct IpcServer {
    /// Unix socket listener
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// If the socket file already exists, it will be removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;

        info!("Listening on {}", socket_path.display());

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Reads until the client shuts down its write half, bounded by a read
    /// timeout and the maximum request size.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = Vec::with_capacity(512);
        let mut limited = (&mut *stream).take(MAX_REQUEST_SIZE as u64 + 1);

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            limited.read_to_end(&mut buffer),
        )
        .await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        };

        if n == 0 {
            anyhow::bail!("Connection closed by client");
        }
        if n > MAX_REQUEST_SIZE {
            return Err(IpcError::RequestTooLarge.into());
        }

        let request: IpcRequest = serde_json::from_slice(&buffer[..n])
            .with_context(|| "Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends an IPC response to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;
        stream
            .shutdown()
            .await
            .context("Failed to close response stream")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to the TimerEngine and the
/// AlertCoordinator.
#[derive(Clone)]
pub struct RequestHandler {
    /// Shared reference to the timer engine
    engine: Arc<Mutex<TimerEngine>>,
    /// Shared reference to the alert coordinator
    alerts: Arc<Mutex<AlertCoordinator>>,
    /// Signalled by the shutdown command
    shutdown: Arc<Notify>,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(
        engine: Arc<Mutex<TimerEngine>>,
        alerts: Arc<Mutex<AlertCoordinator>>,
        shutdown: Arc<Notify>,
    ) -> Self {
        Self {
            engine,
            alerts,
            shutdown,
        }
    }

    /// Reads one request from the stream, handles it and writes the response.
    ///
    /// Malformed requests get an error response.
    ///
    /// # Errors
    ///
    /// Returns an error if the response cannot be written.
    pub async fn serve(&self, mut stream: UnixStream) -> Result<()> {
        let response = match IpcServer::receive_request(&mut stream).await {
            Ok(request) => {
                debug!("Request: {:?}", request);
                self.handle(request).await
            }
            Err(e) => {
                debug!("Bad request: {:#}", e);
                IpcResponse::error(format!("Некорректный запрос: {}", e))
            }
        };
        IpcServer::send_response(&mut stream, &response).await
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        match request {
            IpcRequest::Start { duration } => self.handle_start(&duration).await,
            IpcRequest::Stop => self.handle_stop().await,
            IpcRequest::PauseResume => self.handle_pause_resume().await,
            IpcRequest::Adjust { delta } => self.handle_adjust(delta).await,
            IpcRequest::Dismiss => self.handle_dismiss().await,
            IpcRequest::Status => self.handle_status().await,
            IpcRequest::Shutdown => self.handle_shutdown(),
        }
    }

    /// Handles the start command.
    ///
    /// An expired timer is reset first so a new countdown can begin.
    async fn handle_start(&self, text: &str) -> IpcResponse {
        let seconds = match duration::parse(text) {
            Ok(seconds) => seconds,
            Err(e) => {
                debug!("Rejected duration {:?}: {}", text, e);
                return IpcResponse::error(e.user_message());
            }
        };

        let (outcome, snapshot) = {
            let mut engine = self.engine.lock().await;
            if engine.phase() == TimerPhase::Alerting {
                engine.stop();
            }
            let outcome = engine.start_seconds(seconds);
            (outcome, engine.snapshot())
        };

        let message = match outcome {
            CommandOutcome::Applied => format!("Таймер запущен: {}", format_canonical(seconds)),
            CommandOutcome::Ignored => "Таймер уже запущен".to_string(),
        };
        self.respond(message, &snapshot).await
    }

    /// Handles the stop command.
    async fn handle_stop(&self) -> IpcResponse {
        let snapshot = {
            let mut engine = self.engine.lock().await;
            engine.stop();
            engine.snapshot()
        };
        self.respond(snapshot.phase.status_text(), &snapshot).await
    }

    /// Handles the pause/resume toggle.
    async fn handle_pause_resume(&self) -> IpcResponse {
        let snapshot = {
            let mut engine = self.engine.lock().await;
            engine.pause_resume();
            engine.snapshot()
        };
        self.respond(snapshot.phase.status_text(), &snapshot).await
    }

    /// Handles the adjust command.
    async fn handle_adjust(&self, delta: i64) -> IpcResponse {
        let (outcome, snapshot) = {
            let mut engine = self.engine.lock().await;
            let outcome = engine.adjust(delta);
            (outcome, engine.snapshot())
        };

        let message = match outcome {
            CommandOutcome::Applied => {
                format!("Осталось: {}", format_clock(snapshot.remaining_seconds))
            }
            CommandOutcome::Ignored => snapshot.phase.status_text().to_string(),
        };
        self.respond(message, &snapshot).await
    }

    /// Handles the dismiss command. The timer phase is not changed.
    async fn handle_dismiss(&self) -> IpcResponse {
        let dismissed = self.alerts.lock().await.dismiss();
        let snapshot = self.engine.lock().await.snapshot();

        let message = if dismissed {
            STATUS_DISMISSED
        } else {
            "Нет активного уведомления"
        };
        self.respond(message, &snapshot).await
    }

    /// Handles the status command.
    async fn handle_status(&self) -> IpcResponse {
        let snapshot = self.engine.lock().await.snapshot();
        let alert = self.alerts.lock().await.state();
        IpcResponse::success(
            status_line(snapshot.phase, &alert),
            Some(ResponseData::from_snapshot(&snapshot).with_alert(alert)),
        )
    }

    /// Handles the shutdown command.
    fn handle_shutdown(&self) -> IpcResponse {
        info!("Shutdown requested");
        self.shutdown.notify_one();
        IpcResponse::success("Демон завершает работу", None)
    }

    async fn respond(&self, message: impl Into<String>, snapshot: &TimerSnapshot) -> IpcResponse {
        let alert = self.alerts.lock().await.state();
        IpcResponse::success(
            message,
            Some(ResponseData::from_snapshot(snapshot).with_alert(alert)),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    use crate::daemon::timer::TimerEvent;
    use crate::notification::{MockNotificationSender, MockPrompt};
    use crate::sound::{MockSoundPlayer, SoundPlayer};
    use crate::types::AlertConfig;

    // ------------------------------------------------------------------------
    // Helper functions
    // ------------------------------------------------------------------------

    fn create_temp_socket_path() -> PathBuf {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sock");
        // Keep the directory so it's not deleted
        std::mem::forget(dir);
        path
    }

    struct Harness {
        handler: RequestHandler,
        engine: Arc<Mutex<TimerEngine>>,
        alerts: Arc<Mutex<AlertCoordinator>>,
        shutdown: Arc<Notify>,
        _events: mpsc::UnboundedReceiver<TimerEvent>,
    }

    fn create_handler() -> Harness {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Arc::new(Mutex::new(TimerEngine::new(tx)));
        let alerts = Arc::new(Mutex::new(AlertCoordinator::new(
            AlertConfig::default(),
            Arc::new(MockNotificationSender::new()),
            Arc::new(MockPrompt::new()),
            Some(Arc::new(MockSoundPlayer::new()) as Arc<dyn SoundPlayer>),
        )));
        let shutdown = Arc::new(Notify::new());
        Harness {
            handler: RequestHandler::new(engine.clone(), alerts.clone(), shutdown.clone()),
            engine,
            alerts,
            shutdown,
            _events: rx,
        }
    }

    async fn exchange(socket_path: &Path, request: &str) -> IpcResponse {
        let mut stream = UnixStream::connect(socket_path).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await.unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    // ------------------------------------------------------------------------
    // IpcServer Tests
    // ------------------------------------------------------------------------

    mod ipc_server_tests {
        use super::*;

        #[tokio::test]
        async fn test_server_creation() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path);

            assert!(server.is_ok());
            assert!(socket_path.exists());
        }

        #[tokio::test]
        async fn test_server_removes_existing_socket() {
            let socket_path = create_temp_socket_path();
            std::fs::write(&socket_path, "dummy").unwrap();

            let server = IpcServer::new(&socket_path);
            assert!(server.is_ok());
        }

        #[tokio::test]
        async fn test_server_creates_parent_directory() {
            let dir = tempfile::tempdir().unwrap();
            let socket_path = dir.path().join("subdir").join("test.sock");

            let server = IpcServer::new(&socket_path);
            assert!(server.is_ok());
            assert!(socket_path.parent().unwrap().exists());
        }

        #[tokio::test]
        async fn test_receive_request_adjust() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let client_handle = tokio::spawn(async move {
                let mut stream = UnixStream::connect(&client_path).await.unwrap();
                stream
                    .write_all(br#"{"command":"adjust","delta":-300}"#)
                    .await
                    .unwrap();
                stream.shutdown().await.unwrap();
            });

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await.unwrap();
            assert_eq!(request, IpcRequest::Adjust { delta: -300 });

            client_handle.await.unwrap();
        }

        #[tokio::test]
        async fn test_receive_request_invalid_json() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let _client_handle = tokio::spawn(async move {
                let mut stream = UnixStream::connect(&client_path).await.unwrap();
                stream.write_all(b"not valid json").await.unwrap();
                stream.shutdown().await.unwrap();
            });

            let mut stream = server.accept().await.unwrap();
            assert!(IpcServer::receive_request(&mut stream).await.is_err());
        }

        #[tokio::test]
        async fn test_receive_request_too_large() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let _client_handle = tokio::spawn(async move {
                let mut stream = UnixStream::connect(&client_path).await.unwrap();
                let _ = stream.write_all(&vec![b' '; MAX_REQUEST_SIZE + 10]).await;
                let _ = stream.shutdown().await;
            });

            let mut stream = server.accept().await.unwrap();
            let err = IpcServer::receive_request(&mut stream).await.unwrap_err();
            assert!(err.to_string().contains("too large"));
        }

        #[tokio::test]
        async fn test_connection_closed() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let _client = tokio::spawn(async move {
                let stream = UnixStream::connect(&client_path).await.unwrap();
                drop(stream);
            });

            let mut stream = server.accept().await.unwrap();
            assert!(IpcServer::receive_request(&mut stream).await.is_err());
        }

        #[tokio::test]
        async fn test_server_drop_cleanup() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();
            assert_eq!(server.socket_path(), socket_path);

            drop(server);
            assert!(!socket_path.exists());
        }

        #[test]
        fn test_ipc_error_display() {
            assert_eq!(IpcError::Timeout.to_string(), "Operation timed out");
            assert!(IpcError::RequestTooLarge.to_string().contains("4096"));
        }

        #[test]
        fn test_default_socket_path_file_name() {
            if let Ok(path) = default_socket_path() {
                assert!(path.ends_with("tray-timer.sock"));
            }
        }
    }

    // ------------------------------------------------------------------------
    // RequestHandler Tests
    // ------------------------------------------------------------------------

    mod request_handler_tests {
        use super::*;

        #[tokio::test]
        async fn test_handle_status_idle() {
            let h = create_handler();
            let response = h.handler.handle(IpcRequest::Status).await;

            assert!(response.is_success());
            assert_eq!(response.message, "Таймер остановлен");
            let data = response.data.unwrap();
            assert_eq!(data.phase.as_deref(), Some("idle"));
            assert_eq!(data.remaining_seconds, Some(0));
            assert_eq!(data.display.as_deref(), Some("00:00"));
            assert_eq!(data.alert, Some(Default::default()));
        }

        #[tokio::test]
        async fn test_handle_start() {
            let h = create_handler();
            let response = h
                .handler
                .handle(IpcRequest::Start {
                    duration: "25m".to_string(),
                })
                .await;

            assert!(response.is_success());
            assert_eq!(response.message, "Таймер запущен: 25m");
            let data = response.data.unwrap();
            assert_eq!(data.remaining_seconds, Some(1500));
            assert_eq!(data.is_running, Some(true));
        }

        #[tokio::test]
        async fn test_handle_start_invalid_duration() {
            let h = create_handler();
            let response = h
                .handler
                .handle(IpcRequest::Start {
                    duration: "abc".to_string(),
                })
                .await;

            assert!(!response.is_success());
            assert_eq!(response.message, duration::VALIDATION_MESSAGE);
            assert_eq!(h.engine.lock().await.phase(), TimerPhase::Idle);
        }

        #[tokio::test]
        async fn test_handle_start_while_running_is_ignored() {
            let h = create_handler();
            h.engine.lock().await.start("10").unwrap();

            let response = h
                .handler
                .handle(IpcRequest::Start {
                    duration: "5m".to_string(),
                })
                .await;

            assert!(response.is_success());
            assert_eq!(response.message, "Таймер уже запущен");
            assert_eq!(response.data.unwrap().remaining_seconds, Some(10));
        }

        #[tokio::test]
        async fn test_handle_start_after_expiry_restarts() {
            let h = create_handler();
            {
                let mut engine = h.engine.lock().await;
                engine.start("1").unwrap();
                engine.tick();
                assert_eq!(engine.phase(), TimerPhase::Alerting);
            }

            let response = h
                .handler
                .handle(IpcRequest::Start {
                    duration: "2m".to_string(),
                })
                .await;

            assert_eq!(response.message, "Таймер запущен: 2m");
            assert_eq!(h.engine.lock().await.snapshot().remaining_seconds, 120);
        }

        #[tokio::test]
        async fn test_handle_pause_resume() {
            let h = create_handler();
            h.engine.lock().await.start("1m").unwrap();

            let response = h.handler.handle(IpcRequest::PauseResume).await;
            assert_eq!(response.message, "Таймер на паузе");
            assert_eq!(response.data.unwrap().is_paused, Some(true));

            let response = h.handler.handle(IpcRequest::PauseResume).await;
            assert_eq!(response.message, "Таймер запущен...");
        }

        #[tokio::test]
        async fn test_handle_pause_resume_idle_is_success() {
            let h = create_handler();
            let response = h.handler.handle(IpcRequest::PauseResume).await;

            assert!(response.is_success());
            assert_eq!(response.message, "Таймер остановлен");
        }

        #[tokio::test]
        async fn test_handle_adjust() {
            let h = create_handler();
            h.engine.lock().await.start("5m").unwrap();

            let response = h.handler.handle(IpcRequest::Adjust { delta: 60 }).await;
            assert_eq!(response.message, "Осталось: 06:00");
            assert_eq!(response.data.unwrap().remaining_seconds, Some(360));
        }

        #[tokio::test]
        async fn test_handle_stop() {
            let h = create_handler();
            h.engine.lock().await.start("5m").unwrap();

            let response = h.handler.handle(IpcRequest::Stop).await;
            assert_eq!(response.message, "Таймер остановлен");
            assert_eq!(response.data.unwrap().remaining_seconds, Some(0));
        }

        #[tokio::test]
        async fn test_handle_dismiss_keeps_phase() {
            let h = create_handler();
            {
                let mut engine = h.engine.lock().await;
                engine.start("1").unwrap();
                engine.tick();
            }
            h.alerts.lock().await.on_expired().await;

            let response = h.handler.handle(IpcRequest::Dismiss).await;
            assert_eq!(response.message, "Уведомление отключено");
            let data = response.data.unwrap();
            assert_eq!(data.phase.as_deref(), Some("alerting"));
            assert!(data.alert.unwrap().dismissed);

            let status = h.handler.handle(IpcRequest::Status).await;
            assert_eq!(status.message, "Уведомление отключено");
        }

        #[tokio::test]
        async fn test_handle_dismiss_without_alert() {
            let h = create_handler();
            let response = h.handler.handle(IpcRequest::Dismiss).await;
            assert!(response.is_success());
            assert_eq!(response.message, "Нет активного уведомления");
        }

        #[tokio::test]
        async fn test_handle_shutdown_notifies() {
            let h = create_handler();
            let response = h.handler.handle(IpcRequest::Shutdown).await;
            assert!(response.is_success());

            // The permit is stored, so this resolves immediately
            tokio::time::timeout(Duration::from_millis(100), h.shutdown.notified())
                .await
                .unwrap();
        }
    }

    // ------------------------------------------------------------------------
    // Integration Tests
    // ------------------------------------------------------------------------

    mod integration_tests {
        use super::*;

        #[tokio::test]
        async fn test_full_ipc_flow() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();
            let h = create_handler();

            let client_path = socket_path.clone();
            let client = tokio::spawn(async move {
                exchange(&client_path, r#"{"command":"start","duration":"90"}"#).await
            });

            let stream = server.accept().await.unwrap();
            h.handler.serve(stream).await.unwrap();

            let response = client.await.unwrap();
            assert_eq!(response.status, "success");
            assert_eq!(response.message, "Таймер запущен: 1m");
            let data = response.data.unwrap();
            assert_eq!(data.phase.as_deref(), Some("running"));
            assert_eq!(data.display.as_deref(), Some("01:30"));
        }

        #[tokio::test]
        async fn test_serve_malformed_request() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();
            let h = create_handler();

            let client_path = socket_path.clone();
            let client =
                tokio::spawn(async move { exchange(&client_path, r#"{"command":"explode"}"#).await });

            let stream = server.accept().await.unwrap();
            h.handler.serve(stream).await.unwrap();

            let response = client.await.unwrap();
            assert_eq!(response.status, "error");
            assert!(response.message.starts_with("Некорректный запрос"));
        }

        #[tokio::test]
        async fn test_all_commands_flow() {
            let h = create_handler();

            let commands = vec![
                (r#"{"command":"start","duration":"1m"}"#, "running"),
                (r#"{"command":"pauseresume"}"#, "paused"),
                (r#"{"command":"adjust","delta":-30}"#, "paused"),
                (r#"{"command":"pauseresume"}"#, "running"),
                (r#"{"command":"stop"}"#, "idle"),
                (r#"{"command":"status"}"#, "idle"),
            ];

            for (cmd_json, expected_phase) in commands {
                let request: IpcRequest = serde_json::from_str(cmd_json).unwrap();
                let response = h.handler.handle(request).await;

                assert!(response.is_success(), "Command: {}", cmd_json);
                let data = response.data.unwrap();
                assert_eq!(
                    data.phase.as_deref(),
                    Some(expected_phase),
                    "Command: {}",
                    cmd_json
                );
            }
        }
    }
}
