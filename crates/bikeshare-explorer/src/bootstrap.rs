use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.bikeshare-explorer/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.bikeshare-explorer/`
/// - `~/.bikeshare-explorer/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let explorer_dir = home.join(".bikeshare-explorer");
    std::fs::create_dir_all(&explorer_dir)?;
    std::fs::create_dir_all(explorer_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => return setup_with_directive(&other.to_lowercase()),
    };
    setup_with_directive(normalised)
}

fn setup_with_directive(directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Data-directory discovery ───────────────────────────────────────────────────

/// Attempt to locate the directory holding the per-city CSV files.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./data/`
/// 2. `.` (the current directory)
/// 3. `~/.bikeshare-explorer/data/`
///
/// Returns `None` when none exists (the caller falls back to `.`).
pub fn discover_data_dir() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from("data"), PathBuf::from(".")];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".bikeshare-explorer").join("data"));
    }
    candidates.into_iter().find(|p| p.is_dir())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
