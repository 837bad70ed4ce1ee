use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pile_core::settings::APP_DIR_NAME;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name of the default log inside `~/.solar-pile/logs/`.
pub const LOG_FILE_NAME: &str = "solar-pile.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.solar-pile/` and `~/.solar-pile/logs/` exist and return the
/// application directory.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(APP_DIR_NAME);
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(app_dir)
}

/// Log file used when `--log-file` is not given.
pub fn default_log_path(app_dir: &Path) -> PathBuf {
    app_dir.join("logs").join(LOG_FILE_NAME)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map the CLI level names onto `tracing` filter directives.
///
/// Unknown strings pass through unchanged so that full `EnvFilter`
/// directives (e.g. `pile_core=trace`) keep working.
pub fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber, appending to `log_path`.
///
/// The terminal belongs to the TUI while it runs, so nothing is written to
/// stderr.
pub fn setup_logging(log_level: &str, log_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let filter =
        EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
