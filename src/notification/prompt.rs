//! Blocking acknowledgment prompt.
//!
//! Used when no notification can be shown. The prompt is a modal dialog run
//! by a platform tool (`osascript` on macOS, `zenity` elsewhere) on the
//! blocking pool, so the countdown and alert tickers keep running while it is
//! open. Closing the dialog in any way counts as acknowledgment.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

use super::NotificationError;

/// Shows a prompt and resolves once the user has acknowledged it.
#[async_trait]
pub trait AcknowledgePrompt: Send + Sync {
    /// Shows the prompt and waits until it is closed.
    async fn acknowledge(&self, title: &str, body: &str) -> Result<(), NotificationError>;

    /// Returns true if a prompt can be shown on this system.
    fn is_available(&self) -> bool;
}

// ============================================================================
// DialogPrompt
// ============================================================================

/// Prompt implemented with the platform dialog tool.
#[derive(Debug, Clone)]
pub struct DialogPrompt {
    program: Option<PathBuf>,
}

#[cfg(target_os = "macos")]
const DIALOG_PROGRAM: &str = "osascript";
#[cfg(not(target_os = "macos"))]
const DIALOG_PROGRAM: &str = "zenity";

impl DialogPrompt {
    /// Locates the dialog tool on `PATH`.
    pub fn new() -> Self {
        let program = find_in_path(DIALOG_PROGRAM);
        if program.is_none() {
            debug!("{} not found on PATH", DIALOG_PROGRAM);
        }
        Self { program }
    }

    fn command(program: &Path, title: &str, body: &str) -> Command {
        let mut command = Command::new(program);
        if cfg!(target_os = "macos") {
            let script = format!(
                "display dialog \"{}\" with title \"{}\" buttons {{\"OK\"}} default button \"OK\"",
                escape_applescript(body),
                escape_applescript(title)
            );
            command.arg("-e").arg(script);
        } else {
            command
                .arg("--info")
                .arg(format!("--title={}", title))
                .arg(format!("--text={}", body));
        }
        command
    }
}

impl Default for DialogPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AcknowledgePrompt for DialogPrompt {
    async fn acknowledge(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        let program = self
            .program
            .clone()
            .ok_or_else(|| NotificationError::PromptUnavailable(DIALOG_PROGRAM.to_string()))?;

        info!("Showing acknowledgment prompt");
        let mut command = Self::command(&program, title, body);

        let status = tokio::task::spawn_blocking(move || command.status())
            .await
            .map_err(|e| NotificationError::PromptFailed(e.to_string()))?
            .map_err(|e| NotificationError::PromptFailed(e.to_string()))?;

        // Cancel and window-close exit non-zero; both mean the user saw it
        debug!("Prompt closed with {}", status);
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.program.is_some()
    }
}

fn find_in_path(program: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

// ============================================================================
// MockPrompt
// ============================================================================

/// Prompt double that records calls and acknowledges immediately.
#[derive(Debug)]
pub struct MockPrompt {
    prompts: Mutex<Vec<(String, String)>>,
    available: AtomicBool,
    should_fail: AtomicBool,
    calls: AtomicUsize,
}

impl Default for MockPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn prompt_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn get_prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AcknowledgePrompt for MockPrompt {
    async fn acknowledge(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::PromptFailed("Mock failure".to_string()));
        }
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push((title.to_string(), body.to_string()));
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}
