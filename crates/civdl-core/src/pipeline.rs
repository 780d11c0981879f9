//! Per-link driver: resolve, fetch the model, then its preview.
//!
//! Links are processed one at a time, end to end. A failure on one link is
//! reported and the loop moves on; only an unreadable input file is fatal.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogClient;
use crate::config::CivdlConfig;
use crate::fetcher::{FetchError, FetchOutcome, Fetcher};
use crate::http::HttpClient;
use crate::layout::destination_folder;
use crate::links::LinkExtractor;
use crate::resolver::{ResolveError, Resolver};

/// Final state of one link.
#[derive(Debug)]
pub enum LinkStatus {
    Downloaded { path: PathBuf, bytes: u64 },
    /// Model file was already on disk.
    Skipped { path: PathBuf },
    ResolveFailed(ResolveError),
    FetchFailed { file_name: String, error: FetchError },
}

impl LinkStatus {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            LinkStatus::ResolveFailed(_) | LinkStatus::FetchFailed { .. }
        )
    }
}

#[derive(Debug)]
pub struct LinkReport {
    pub url: String,
    pub status: LinkStatus,
    /// Preview result; `None` when previews are disabled or the model failed.
    /// `Some(Ok(None))` means the catalog listed no preview.
    pub preview: Option<Result<Option<FetchOutcome>, FetchError>>,
}

/// Outcome of a whole run, in input order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<LinkReport>,
}

impl RunSummary {
    pub fn downloaded(&self) -> usize {
        self.count(|s| matches!(s, LinkStatus::Downloaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, LinkStatus::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(LinkStatus::is_failure)
    }

    fn count(&self, pred: impl Fn(&LinkStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.status)).count()
    }
}

/// Resolver + fetcher + destination settings for one run.
pub struct Pipeline<R> {
    resolver: R,
    fetcher: Fetcher,
    base_path: Option<PathBuf>,
    download_previews: bool,
}

impl Pipeline<CatalogClient> {
    /// Catalog-backed pipeline from configuration. `base_path` overrides
    /// `cfg.download_dir` when set.
    pub fn from_config(cfg: &CivdlConfig, base_path: Option<PathBuf>) -> Self {
        let http = HttpClient::new(cfg.http_or_default());
        Pipeline::new(CatalogClient::from_config(cfg), Fetcher::new(http))
            .with_base_path(base_path.or_else(|| cfg.download_dir.clone()))
            .with_previews(cfg.download_previews)
    }
}

impl<R: Resolver> Pipeline<R> {
    pub fn new(resolver: R, fetcher: Fetcher) -> Self {
        Self {
            resolver,
            fetcher,
            base_path: None,
            download_previews: true,
        }
    }

    pub fn with_base_path(mut self, base_path: Option<PathBuf>) -> Self {
        self.base_path = base_path;
        self
    }

    pub fn with_previews(mut self, download_previews: bool) -> Self {
        self.download_previews = download_previews;
        self
    }

    /// Base folder that model-type folders are created under.
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    pub fn downloads_previews(&self) -> bool {
        self.download_previews
    }

    /// Resolve and fetch one link, writing status lines to `out`.
    pub fn process_link<W: Write>(&self, url: &str, out: &mut W) -> LinkReport {
        let descriptor = match self.resolver.resolve(url) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(url, "resolve failed: {}", e);
                let _ = writeln!(out, "Error: unable to get download link for {}: {}", url, e);
                return LinkReport {
                    url: url.to_string(),
                    status: LinkStatus::ResolveFailed(e),
                    preview: None,
                };
            }
        };

        let folder = destination_folder(self.base_path.as_deref(), &descriptor.model_type);
        let _ = writeln!(out, "Downloading {}...", descriptor.file_name);

        let status = match self.fetcher.fetch_model(&descriptor, &folder) {
            Ok(FetchOutcome::Downloaded { path, bytes }) => {
                let _ = writeln!(out, "{} downloaded successfully.", descriptor.file_name);
                LinkStatus::Downloaded { path, bytes }
            }
            Ok(FetchOutcome::Skipped { path }) => {
                let _ = writeln!(
                    out,
                    "File '{}' already exists, skipped.",
                    descriptor.file_name
                );
                LinkStatus::Skipped { path }
            }
            Err(error) => {
                tracing::warn!(url, file = %descriptor.file_name, "download failed: {}", error);
                let _ = writeln!(
                    out,
                    "Error: failed to download {}: {}",
                    descriptor.file_name, error
                );
                return LinkReport {
                    url: url.to_string(),
                    status: LinkStatus::FetchFailed {
                        file_name: descriptor.file_name.clone(),
                        error,
                    },
                    preview: None,
                };
            }
        };

        let preview = self.download_previews.then(|| {
            let result = self.fetcher.fetch_preview(&descriptor, &folder);
            report_preview(&result, out);
            result
        });

        LinkReport {
            url: url.to_string(),
            status,
            preview,
        }
    }

    /// Process `links` in order; never stops early.
    pub fn run<'a, I, W>(&self, links: I, out: &mut W) -> RunSummary
    where
        I: IntoIterator<Item = &'a str>,
        W: Write,
    {
        let mut summary = RunSummary::default();
        for url in links {
            summary.reports.push(self.process_link(url, out));
        }
        tracing::info!(
            downloaded = summary.downloaded(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "run finished"
        );
        summary
    }

    /// Read `markdown_path`, extract its links and process them.
    ///
    /// Fails only if the input file is missing or unreadable.
    pub fn run_file<W: Write>(
        &self,
        markdown_path: &Path,
        extractor: &dyn LinkExtractor,
        out: &mut W,
    ) -> Result<RunSummary> {
        if !markdown_path.exists() {
            anyhow::bail!("file '{}' does not exist", markdown_path.display());
        }
        let text = std::fs::read_to_string(markdown_path)
            .with_context(|| format!("read markdown file: {}", markdown_path.display()))?;
        let summary = self.run(extractor.links(&text), out);
        Ok(summary)
    }
}

fn report_preview<W: Write>(result: &Result<Option<FetchOutcome>, FetchError>, out: &mut W) {
    match result {
        Ok(Some(FetchOutcome::Downloaded { path, .. })) => {
            tracing::debug!(path = %path.display(), "preview written");
        }
        Ok(Some(FetchOutcome::Skipped { path })) => {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            let _ = writeln!(out, "Preview image '{}' already exists, skipped.", name);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("preview failed: {}", e);
            let _ = writeln!(out, "Failed to download preview image: {}", e);
        }
    }
}
