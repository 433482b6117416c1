//! IPC Client for communicating with the tray timer daemon.
//!
//! This module provides:
//! - Unix Domain Socket client
//! - Request/response handling
//! - Connection retry logic
//! - Timeout handling

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::daemon::default_socket_path;
use crate::types::{IpcRequest, IpcResponse};

// ============================================================================
// Constants
// ============================================================================

/// Connection timeout in seconds
const CONNECTION_TIMEOUT_SECS: u64 = 5;

/// Read/write timeout in seconds
const IO_TIMEOUT_SECS: u64 = 5;

/// Maximum response size in bytes (64KB)
const MAX_RESPONSE_SIZE: u64 = 65536;

/// Maximum retry attempts
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds (base delay, multiplied by attempt number)
const RETRY_DELAY_MS: u64 = 500;

// ============================================================================
// IpcClient
// ============================================================================

/// IPC client for daemon communication.
#[derive(Debug, Clone)]
pub struct IpcClient {
    /// Socket path
    socket_path: PathBuf,
    /// Connection timeout
    timeout: Duration,
}

impl IpcClient {
    /// Creates a new IPC client with the default socket path.
    ///
    /// # Errors
    ///
    /// Returns an error if the default socket path cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::with_socket_path(default_socket_path()?))
    }

    /// Creates a new IPC client with a custom socket path.
    pub fn with_socket_path(socket_path: PathBuf) -> Self {
        Self {
            socket_path,
            timeout: Duration::from_secs(CONNECTION_TIMEOUT_SECS),
        }
    }

    /// Creates a client for `socket_path`, or the default path when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the default socket path cannot be determined.
    pub fn for_socket(socket_path: Option<PathBuf>) -> Result<Self> {
        match socket_path {
            Some(path) => Ok(Self::with_socket_path(path)),
            None => Self::new(),
        }
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Sends a start command to the daemon.
    pub async fn start(&self, duration: &str) -> Result<IpcResponse> {
        self.request(&IpcRequest::Start {
            duration: duration.to_string(),
        })
        .await
    }

    /// Sends a stop command to the daemon.
    pub async fn stop(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::Stop).await
    }

    /// Sends a pause/resume toggle to the daemon.
    pub async fn pause_resume(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::PauseResume).await
    }

    /// Sends an adjust command to the daemon.
    pub async fn adjust(&self, delta: i64) -> Result<IpcResponse> {
        self.request(&IpcRequest::Adjust { delta }).await
    }

    /// Sends a dismiss command to the daemon.
    pub async fn dismiss(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::Dismiss).await
    }

    /// Sends a status query to the daemon.
    pub async fn status(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::Status).await
    }

    /// Asks the daemon to exit.
    pub async fn shutdown(&self) -> Result<IpcResponse> {
        self.request(&IpcRequest::Shutdown).await
    }

    /// Sends a request and turns error responses into errors.
    async fn request(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let response = self.send_request_with_retry(request).await?;
        if !response.is_success() {
            anyhow::bail!("{}", response.message);
        }
        Ok(response)
    }

    /// Sends a request to the daemon with retry logic.
    ///
    /// Only transport failures are retried; a response from the daemon is
    /// final.
    async fn send_request_with_retry(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let mut attempt = 1;
        loop {
            match self.send_request(request).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < MAX_RETRIES => {
                    tracing::warn!("Request failed (attempt {}/{}): {:#}", attempt, MAX_RETRIES, e);
                    let delay = Duration::from_millis(RETRY_DELAY_MS * u64::from(attempt));
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Sends a single request to the daemon.
    async fn send_request(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let mut stream = timeout(self.timeout, UnixStream::connect(&self.socket_path))
            .await
            .context("Connection timed out")?
            .context("Не удалось подключиться к демону. Запустите 'tray-timer daemon'")?;

        let request_json = serde_json::to_vec(request).context("Failed to serialize request")?;

        timeout(
            Duration::from_secs(IO_TIMEOUT_SECS),
            stream.write_all(&request_json),
        )
        .await
        .context("Write timed out")?
        .context("Failed to send request")?;

        // Shutdown write side to signal end of request
        stream
            .shutdown()
            .await
            .context("Failed to finish request")?;

        let mut buffer = Vec::with_capacity(1024);
        let n = timeout(
            Duration::from_secs(IO_TIMEOUT_SECS),
            (&mut stream).take(MAX_RESPONSE_SIZE).read_to_end(&mut buffer),
        )
        .await
        .context("Read timed out")?
        .context("Failed to receive response")?;

        if n == 0 {
            anyhow::bail!("Демон не ответил");
        }

        let response: IpcResponse =
            serde_json::from_slice(&buffer[..n]).context("Failed to parse response")?;

        Ok(response)
    }
}

// ============================================================================
// Tests
// ============================================================================
