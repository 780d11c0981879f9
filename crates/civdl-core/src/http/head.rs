//! Parse HTTP response header lines into a ResponseHead.

/// Status and length of the final response in a (possibly redirected) exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// Status code of the latest status line seen (0 before any).
    pub status: u32,
    /// `Content-Length` of the latest response, if present.
    pub content_length: Option<u64>,
}

impl ResponseHead {
    /// Feed one raw header line as delivered by libcurl.
    ///
    /// A status line starts a new response (redirect hop), so earlier
    /// headers are discarded.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if line.starts_with("HTTP/") {
            if let Some(code) = line
                .split_whitespace()
                .nth(1)
                .and_then(|c| c.parse::<u32>().ok())
            {
                *self = ResponseHead {
                    status: code,
                    content_length: None,
                };
            }
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                self.content_length = value.trim().parse::<u64>().ok();
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
