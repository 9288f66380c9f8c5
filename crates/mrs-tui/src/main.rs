//! `mrs-tui` -- Live terminal dashboard for a MercariSearcher backend.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `mrs-core`'s snapshot streams. Two screens, navigable by number keys:
//! Dashboard (stat cards + recent items) and Searches (saved query table
//! with toggle/delete/test actions).
//!
//! Logs are written to a file (default `/tmp/mrs-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task continuously
//! streams poller updates from the monitor into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod clipboard;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use mrs_core::{Monitor, MonitorConfig};

use crate::app::App;

/// Live terminal dashboard for a MercariSearcher backend.
#[derive(Parser, Debug)]
#[command(name = "mrs-tui", version, about)]
struct Cli {
    /// Backend base URL (e.g., http://127.0.0.1:5000)
    #[arg(short = 's', long, env = "MRS_SERVER")]
    server: Option<String>,

    /// Backend profile from the config file
    #[arg(short = 'p', long, env = "MRS_PROFILE")]
    profile: Option<String>,

    /// Log file path (defaults to /tmp/mrs-tui.log)
    #[arg(long, default_value = "/tmp/mrs-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr -- that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mrs_tui={log_level},mrs_core={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("mrs-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the monitor configuration: `--server` flag wins, then the
/// named (or default) profile, then the built-in localhost default.
fn build_monitor_config(cli: &Cli) -> Result<MonitorConfig> {
    if let Some(ref server) = cli.server {
        let mut config = MonitorConfig::default();
        config.server_url = server.parse()?;
        return Ok(config);
    }

    let cfg = mrs_config::load_config_or_default();
    let profile_name = cli
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    match cfg.profiles.get(&profile_name) {
        Some(profile) => Ok(mrs_config::profile_to_monitor_config(profile)?),
        None => Ok(MonitorConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file -- hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = build_monitor_config(&cli)?;
    info!(server = %config.server_url, "starting mrs-tui");

    let monitor = Monitor::new(config)?;
    let mut app = App::new(monitor);
    app.run().await?;

    Ok(())
}
