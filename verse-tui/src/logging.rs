//! File-backed tracing subscriber; the terminal belongs to the UI.

use crate::error::TuiError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "verse_client=debug,verse_tui=info,warn";

pub fn init(log_path: &Path) -> Result<(), TuiError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| TuiError::Logging(e.to_string()))?;

    tracing::info!(log_path = %log_path.display(), "logging initialized");
    Ok(())
}
