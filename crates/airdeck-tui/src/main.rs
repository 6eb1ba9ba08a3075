//! `airdeck`: real-time terminal dashboard for networked air quality sensors.
//!
//! Built on [ratatui](https://ratatui.rs). Sensors come from the command
//! line, from mDNS discovery, or from the add-device prompt; each is polled
//! independently so one slow sensor never stalls the others.
//!
//! Logs are written to a file (default `/tmp/airdeck.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod event;
mod layout;
mod prompt;
mod state;
mod theme;
mod tui;
mod ui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use airdeck_core::poller::DEFAULT_POLL_INTERVAL_SECS;
use airdeck_core::{AirClient, TempUnit, TransportConfig};
use chrono::Local;
use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::state::Dashboard;

/// Real-time air quality dashboard for local network sensors.
#[derive(Parser, Debug)]
#[command(
    name = "airdeck",
    version,
    about,
    after_help = "Examples:\n  airdeck                       Auto-discover devices\n  airdeck 192.168.1.100         Connect to a specific device\n  airdeck -i 5 192.168.1.100    Poll every 5s\n  airdeck --fahrenheit          Show temperatures in °F"
)]
struct Cli {
    /// Sensor IP addresses to monitor
    #[arg(value_name = "IP")]
    ips: Vec<String>,

    /// Disable mDNS auto-discovery
    #[arg(long)]
    no_discovery: bool,

    /// Polling interval in seconds [default: 10]
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Display temperatures in Fahrenheit
    #[arg(short, long)]
    fahrenheit: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/airdeck.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "airdeck={log_level},airdeck_core={log_level},airdeck_api={log_level},airdeck_config={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("airdeck.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file, hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    // Priority: CLI flags > config file > built-in defaults
    let config = airdeck_config::load_config_or_default();
    let interval = cli
        .interval
        .or(config.defaults.interval.filter(|secs| *secs >= 1))
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
    let unit = if cli.fahrenheit || config.defaults.fahrenheit {
        TempUnit::Fahrenheit
    } else {
        TempUnit::Celsius
    };
    let discovery_enabled = !cli.no_discovery && config.defaults.discovery;

    info!(
        devices = cli.ips.len(),
        interval,
        discovery = discovery_enabled,
        "starting airdeck"
    );

    let client = AirClient::new(&TransportConfig::default())?;
    let dash = Dashboard::new(
        config.devices,
        &cli.ips,
        unit,
        discovery_enabled,
        Local::now(),
    );

    let mut app = App::new(dash, client, Duration::from_secs(interval));
    app.run().await?;

    Ok(())
}
