//! Tray Timer - a countdown timer that lives in the system tray
//!
//! The binary is both the front end and the daemon:
//! - `tray-timer daemon` runs the countdown, the alerts and the tray icon
//! - every other subcommand talks to the daemon over a Unix socket

use anyhow::Result;
use clap::{CommandFactory, Parser};

use tray_timer::cli::{Cli, Commands, Display, IpcClient};
use tray_timer::daemon::{default_socket_path, run_daemon};
use tray_timer::duration::adjust_input;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let socket = cli.socket;
    match cli.command {
        Some(Commands::Start { duration }) => {
            let response = IpcClient::for_socket(socket)?.start(&duration).await?;
            Display::show_start_success(&response);
        }
        Some(Commands::Stop) => {
            let response = IpcClient::for_socket(socket)?.stop().await?;
            Display::show_stop_success(&response);
        }
        Some(Commands::Pause) => {
            let response = IpcClient::for_socket(socket)?.pause_resume().await?;
            Display::show_pause_success(&response);
        }
        Some(Commands::Adjust { delta }) => {
            let response = IpcClient::for_socket(socket)?.adjust(delta).await?;
            Display::show_adjust_success(&response);
        }
        Some(Commands::Dismiss) => {
            let response = IpcClient::for_socket(socket)?.dismiss().await?;
            Display::show_dismiss_success(&response);
        }
        Some(Commands::Status) => {
            let response = IpcClient::for_socket(socket)?.status().await?;
            Display::show_status(&response);
        }
        Some(Commands::Shutdown) => {
            let response = IpcClient::for_socket(socket)?.shutdown().await?;
            Display::show_shutdown_success(&response);
        }
        Some(Commands::Nudge { current, delta }) => {
            let updated = adjust_input(&current, delta);
            Display::show_nudge(&current, updated.as_deref());
        }
        Some(Commands::Daemon(args)) => {
            let socket_path = match socket {
                Some(path) => path,
                None => default_socket_path()?,
            };
            run_daemon(&socket_path, args.to_config()).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
