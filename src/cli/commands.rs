//! Command definitions for the tray timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::duration;
use crate::types::AlertConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Tray Timer - a countdown timer for the system tray
#[derive(Parser, Debug)]
#[command(
    name = "tray-timer",
    version,
    about = "Таймер обратного отсчета в системном трее",
    long_about = "Таймер обратного отсчета в системном трее.\n\
                  Команды управляют фоновым демоном, который ведет отсчет, \
                  показывает уведомление и подает звуковой сигнал.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Daemon socket path (defaults to the runtime directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start a countdown (e.g. 500, 90s, 25m, 1h, 1d, 2h15m)
    Start {
        /// Duration text; bare numbers are seconds
        #[arg(value_name = "DURATION", value_parser = validate_duration)]
        duration: String,
    },

    /// Stop the countdown or the alert
    Stop,

    /// Pause a running countdown or resume a paused one
    #[command(visible_aliases = ["resume", "toggle"])]
    Pause,

    /// Add time to the countdown (negative values subtract)
    Adjust {
        /// Signed duration, e.g. +5m or -60
        #[arg(value_name = "DELTA", allow_hyphen_values = true, value_parser = parse_delta_arg)]
        delta: i64,
    },

    /// Acknowledge the expiry alert
    Dismiss,

    /// Show current timer status
    Status,

    /// Stop the daemon
    Shutdown,

    /// Print a duration input nudged by DELTA
    Nudge {
        /// Current input text
        #[arg(value_name = "CURRENT", allow_hyphen_values = true)]
        current: String,

        /// Signed duration step, e.g. +5m or -1m
        #[arg(value_name = "DELTA", allow_hyphen_values = true, value_parser = parse_delta_arg)]
        delta: i64,
    },

    /// Run as daemon (background service)
    Daemon(DaemonArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Daemon Command Arguments
// ============================================================================

/// Arguments for the daemon command
#[derive(Args, Debug, Clone)]
pub struct DaemonArgs {
    /// Disable the alert tone
    #[arg(long)]
    pub no_sound: bool,

    /// Disable the expiry notification and its prompt fallback
    #[arg(long)]
    pub no_notify: bool,

    /// Sound name or file path replacing the synthesized tone
    #[arg(long, value_name = "NAME|PATH")]
    pub sound: Option<String>,

    /// Tone repetition period in milliseconds (100-10000)
    #[arg(
        long,
        default_value = "600",
        value_parser = clap::value_parser!(u64).range(100..=10_000)
    )]
    pub tone_interval_ms: u64,

    /// Blink period in milliseconds (100-10000)
    #[arg(
        long,
        default_value = "500",
        value_parser = clap::value_parser!(u64).range(100..=10_000)
    )]
    pub blink_interval_ms: u64,
}

impl Default for DaemonArgs {
    fn default() -> Self {
        let config = AlertConfig::default();
        Self {
            no_sound: false,
            no_notify: false,
            sound: None,
            tone_interval_ms: config.tone_interval_ms,
            blink_interval_ms: config.blink_interval_ms,
        }
    }
}

impl DaemonArgs {
    /// Converts the arguments into an alert configuration.
    pub fn to_config(&self) -> AlertConfig {
        AlertConfig {
            tone_interval_ms: self.tone_interval_ms,
            blink_interval_ms: self.blink_interval_ms,
            sound_enabled: !self.no_sound,
            notifications_enabled: !self.no_notify,
            sound: self.sound.clone(),
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates duration text, keeping it as typed.
fn validate_duration(s: &str) -> Result<String, String> {
    duration::parse(s)
        .map(|_| s.to_string())
        .map_err(|e| e.user_message().to_string())
}

/// Parses a signed duration into seconds.
fn parse_delta_arg(s: &str) -> Result<i64, String> {
    duration::parse_delta(s).map_err(|e| e.user_message().to_string())
}

// ============================================================================
// Tests
// ============================================================================
