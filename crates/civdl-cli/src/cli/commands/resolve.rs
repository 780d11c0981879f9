//! `civdl resolve <url>` – show what a model page resolves to.

use anyhow::Result;
use civdl_core::catalog::CatalogClient;
use civdl_core::config::CivdlConfig;
use civdl_core::layout;
use civdl_core::resolver::Resolver;

pub fn run_resolve(cfg: &CivdlConfig, url: &str) -> Result<()> {
    let client = CatalogClient::from_config(cfg);
    let descriptor = client.resolve(url)?;
    let folder = layout::destination_folder(cfg.download_dir.as_deref(), &descriptor.model_type);

    println!("{:<10} {}", "TYPE", descriptor.model_type);
    println!("{:<10} {}", "FILE", descriptor.file_name);
    println!("{:<10} {}", "URL", descriptor.download_url);
    println!(
        "{:<10} {}",
        "PREVIEW",
        descriptor.preview_url().unwrap_or("-")
    );
    println!("{:<10} {}", "DEST", folder.join(&descriptor.file_name).display());
    Ok(())
}
