use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Logs go to a file; the terminal belongs to the UI.
///
/// `RAILSHELL_LOG_DIR` overrides the location (default: the user cache dir).
/// Filtering follows `RUST_LOG`, defaulting to `railshell=info`. If no file can
/// be opened, logging stays off.
pub fn setup_tracing() -> Option<PathBuf> {
    let log_dir = std::env::var("RAILSHELL_LOG_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| dirs::cache_dir().map(|dir| dir.join("railshell")))?;
    std::fs::create_dir_all(&log_dir).ok()?;

    let log_path = log_dir.join("railshell.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("railshell=info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    tracing::info!(path = ?log_path, "tracing initialized");
    Some(log_path)
}
