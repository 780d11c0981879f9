//! `civdl config-path` – print where the configuration lives.

use anyhow::Result;
use civdl_core::{config, logging};

pub fn run_config_path() -> Result<()> {
    println!("{}", config::config_path()?.display());
    if let Ok(log) = logging::log_file_path() {
        tracing::debug!("log file: {}", log.display());
    }
    Ok(())
}
