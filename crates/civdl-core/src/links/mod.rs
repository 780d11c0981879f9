//! Link extraction from markdown text.
//!
//! The pipeline only depends on the `LinkExtractor` trait; the regex-based
//! extractors in `pattern` can be swapped for a real markdown parser without
//! touching resolution or download code.

mod pattern;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use pattern::{BareAndMarkdownLinks, MarkdownLinks};

/// Which link shapes are picked up from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractPolicy {
    /// `[label](url)` targets plus bare `http(s)://` tokens.
    #[default]
    BareAndMarkdown,
    /// Only `[label](url)` targets.
    MarkdownOnly,
}

/// Produces candidate URLs from text, in document order, without deduplication.
///
/// The returned iterator borrows `text`; calling `links` again restarts it.
pub trait LinkExtractor {
    fn links<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

/// Builds the extractor for `policy`.
pub fn extractor_for(policy: ExtractPolicy) -> Result<Box<dyn LinkExtractor>> {
    Ok(match policy {
        ExtractPolicy::BareAndMarkdown => Box::new(BareAndMarkdownLinks::new()?),
        ExtractPolicy::MarkdownOnly => Box::new(MarkdownLinks::new()?),
    })
}

/// Collects every link in `text` using `policy`.
pub fn extract_links(text: &str, policy: ExtractPolicy) -> Result<Vec<String>> {
    let extractor = extractor_for(policy)?;
    Ok(extractor.links(text).map(str::to_string).collect())
}

/// Reads `path` as UTF-8 and extracts its links.
pub fn read_links(path: &Path, policy: ExtractPolicy) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read markdown file: {}", path.display()))?;
    extract_links(&text, policy)
}
