use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::links::ExtractPolicy;

/// Default catalog endpoint; model lookups go to `{api_base}/models/{id}`.
pub const DEFAULT_API_BASE: &str = "https://civitai.com/api/v1";

/// HTTP transport parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds. Unset means libcurl's default; transfers
    /// themselves are never timed out.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Maximum number of redirects followed per request.
    pub max_redirections: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            user_agent: format!("civdl/{}", env!("CARGO_PKG_VERSION")),
            max_redirections: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/civdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CivdlConfig {
    /// Base URL of the catalog API (no trailing slash needed).
    pub api_base: String,
    /// Base destination folder. Unset means model-type folders are created
    /// relative to the working directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Whether to fetch the first preview image next to each model.
    #[serde(default = "default_true")]
    pub download_previews: bool,
    /// File `type` values accepted when picking the file of a model version.
    #[serde(default = "default_accepted_file_types")]
    pub accepted_file_types: Vec<String>,
    /// How links are found in the markdown input.
    #[serde(default)]
    pub extract_policy: ExtractPolicy,
    /// Optional transport settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

fn default_true() -> bool {
    true
}

fn default_accepted_file_types() -> Vec<String> {
    vec!["Model".to_string(), "Negative".to_string()]
}

impl Default for CivdlConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            download_dir: None,
            download_previews: true,
            accepted_file_types: default_accepted_file_types(),
            extract_policy: ExtractPolicy::default(),
            http: None,
        }
    }
}

impl CivdlConfig {
    /// Transport settings with defaults filled in.
    pub fn http_or_default(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("civdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CivdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CivdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CivdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
