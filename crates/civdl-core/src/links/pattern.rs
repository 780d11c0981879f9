//! Regex extractors over raw markdown text.

use regex::Regex;

use super::LinkExtractor;

/// `[label](target ...)`; the target stops at whitespace or `)`, so an
/// optional `"title"` after it is ignored.
const MARKDOWN_LINK: &str = r"\[[^\]]*\]\(([^\s)]+)";

/// Markdown targets (`md`) or bare `http(s)://` tokens not preceded by `(` (`bare`).
const BARE_OR_MARKDOWN: &str =
    r"\[[^\]]*\]\((?P<md>https?://[^\s)]+)|(?:^|[^(])(?P<bare>https?://[^\s)]+)";

/// Punctuation that ends a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"', '>', ']'];

/// Only markdown-style link targets.
pub struct MarkdownLinks {
    re: Regex,
}

impl MarkdownLinks {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(MARKDOWN_LINK)?,
        })
    }
}

impl LinkExtractor for MarkdownLinks {
    fn links<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(
            self.re
                .captures_iter(text)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str())),
        )
    }
}

/// Markdown link targets plus bare URLs appearing anywhere in the text.
pub struct BareAndMarkdownLinks {
    re: Regex,
}

impl BareAndMarkdownLinks {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(BARE_OR_MARKDOWN)?,
        })
    }
}

impl LinkExtractor for BareAndMarkdownLinks {
    fn links<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(self.re.captures_iter(text).filter_map(|caps| {
            if let Some(m) = caps.name("md") {
                return Some(m.as_str());
            }
            let bare = caps.name("bare")?.as_str();
            let trimmed = bare.trim_end_matches(TRAILING_PUNCTUATION);
            // "https://" alone is not a link.
            (trimmed.len() > bare.find("://")? + 3).then_some(trimmed)
        }))
    }
}
