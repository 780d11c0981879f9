//! CLI for civdl, the markdown-driven model downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use civdl_core::config;
use std::path::PathBuf;

use commands::{run_config_path, run_fetch, run_links, run_resolve, FetchArgs};

/// Top-level CLI for civdl.
#[derive(Debug, Parser)]
#[command(name = "civdl")]
#[command(about = "civdl: download models linked from a markdown file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve and download every model linked from a markdown file.
    Fetch {
        /// Markdown file containing model page links.
        file: PathBuf,
        /// Destination base folder (models land in <PATH>/<model type>/).
        #[arg(long, short = 'p', value_name = "DIR")]
        path: Option<PathBuf>,
        /// Do not download preview images.
        #[arg(long)]
        no_preview: bool,
        /// Exit 0 even if some links failed.
        #[arg(long)]
        lenient: bool,
    },

    /// List the links found in a markdown file without downloading.
    Links {
        /// Markdown file to scan.
        file: PathBuf,
    },

    /// Resolve a single model page URL and print the download descriptor.
    Resolve {
        /// Model page URL (e.g. https://civitai.com/models/1234/name).
        url: String,
    },

    /// Print the configuration file path.
    ConfigPath,
}

impl CliCommand {
    /// Parse arguments, run the command and return the process exit status.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                file,
                path,
                no_preview,
                lenient,
            } => {
                let args = FetchArgs {
                    file,
                    path,
                    no_preview,
                    lenient,
                };
                return run_fetch(&cfg, &args);
            }
            CliCommand::Links { file } => run_links(&cfg, &file)?,
            CliCommand::Resolve { url } => run_resolve(&cfg, &url)?,
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests;
