//! Diagnostic logging for civdl.
//!
//! Console status lines are printed by the pipeline; the log file keeps the
//! structured per-link trail (resolved ids, URLs, byte counts, failures).
//! `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,civdl_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/civdl/civdl.log` (usually `~/.local/state/civdl/civdl.log`).
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("civdl")?;
    Ok(xdg_dirs.get_state_home().join("civdl").join("civdl.log"))
}

/// Opens `path` for appending, creating missing parent folders.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("create log dir {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Send diagnostics to the log file. Returns the file's path.
///
/// Fails if the state dir is unusable or a subscriber is already set; the
/// CLI then calls `init_logging_stderr`.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!(log = %path.display(), "civdl {} started", env!("CARGO_PKG_VERSION"));
    Ok(path)
}

/// Diagnostics to stderr, for when the log file cannot be used.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
