//! Blocking HTTP GET over libcurl's easy interface.
//!
//! One handle per request, redirects followed. Bodies are only handed to the
//! caller when the final response is `200 OK`; anything else is drained and
//! reported through the returned `ResponseHead`.

mod head;

pub use head::ResponseHead;

use std::cell::RefCell;
use std::io;
use std::str;
use std::time::Duration;

use thiserror::Error;

use crate::config::HttpConfig;

#[derive(Debug, Error)]
pub enum HttpError {
    /// libcurl failed (bad URL, DNS, connect, reset, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The body sink rejected a chunk; the transfer was aborted.
    #[error("writing body of {url} failed: {source}")]
    Sink {
        url: String,
        #[source]
        source: io::Error,
    },
}

/// Response with the body held in memory (only filled on 200).
#[derive(Debug, Clone)]
pub struct Response {
    pub head: ResponseHead,
    pub body: Vec<u8>,
}

/// Shared request settings for every GET the tool performs.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    cfg: HttpConfig,
}

impl HttpClient {
    pub fn new(cfg: HttpConfig) -> Self {
        Self { cfg }
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.cfg.max_redirections)?;
        easy.useragent(&self.cfg.user_agent)?;
        if let Some(secs) = self.cfg.connect_timeout_secs {
            easy.connect_timeout(Duration::from_secs(secs))?;
        }
        Ok(easy)
    }

    /// GET `url` and buffer the body.
    pub fn get(&self, url: &str) -> Result<Response, HttpError> {
        let mut body = Vec::new();
        let head = self.get_streamed(url, |_, chunk| {
            body.extend_from_slice(chunk);
            Ok(())
        })?;
        Ok(Response { head, body })
    }

    /// GET `url`, passing each body chunk of a 200 response to `on_chunk`.
    ///
    /// `on_chunk` is never called for other statuses, so callers can open
    /// their destination lazily on the first chunk. An error from `on_chunk`
    /// aborts the transfer and is returned as `HttpError::Sink`.
    pub fn get_streamed<F>(&self, url: &str, mut on_chunk: F) -> Result<ResponseHead, HttpError>
    where
        F: FnMut(&ResponseHead, &[u8]) -> io::Result<()>,
    {
        let transport = |source: curl::Error| HttpError::Transport {
            url: url.to_string(),
            source,
        };

        let mut easy = self.easy(url).map_err(transport)?;
        let head = RefCell::new(ResponseHead::default());
        let sink_error: RefCell<Option<io::Error>> = RefCell::new(None);

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|line| {
                    if let Ok(s) = str::from_utf8(line) {
                        head.borrow_mut().push_line(s);
                    }
                    true
                })
                .map_err(transport)?;
            transfer
                .write_function(|data| {
                    let head = head.borrow();
                    if !head.is_ok() {
                        return Ok(data.len());
                    }
                    match on_chunk(&head, data) {
                        Ok(()) => Ok(data.len()),
                        Err(e) => {
                            *sink_error.borrow_mut() = Some(e);
                            Ok(0) // abort transfer
                        }
                    }
                })
                .map_err(transport)?;
            transfer.perform()
        };

        if let Some(source) = sink_error.into_inner() {
            return Err(HttpError::Sink {
                url: url.to_string(),
                source,
            });
        }
        performed.map_err(transport)?;

        let mut head = head.into_inner();
        head.status = easy.response_code().map_err(transport)?;
        tracing::debug!(url, status = head.status, "GET finished");
        Ok(head)
    }
}
