//! `civdl links <file>` – list the links that `fetch` would process.

use anyhow::Result;
use civdl_core::config::CivdlConfig;
use civdl_core::links;
use std::path::Path;

pub fn run_links(cfg: &CivdlConfig, path: &Path) -> Result<()> {
    let found = links::read_links(path, cfg.extract_policy)?;
    if found.is_empty() {
        println!("No links found in {}.", path.display());
    }
    for link in &found {
        println!("{}", link);
    }
    tracing::debug!(count = found.len(), policy = ?cfg.extract_policy, "listed links");
    Ok(())
}
