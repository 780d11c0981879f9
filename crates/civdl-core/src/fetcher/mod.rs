//! Materializes a resolved model (and its optional preview) on disk.
//!
//! Both operations are idempotent: an existing destination file is reported
//! as skipped and no request is made.

mod preview;
mod progress;

pub use preview::reencode_png;
pub use progress::ProgressStats;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::http::{HttpClient, HttpError};
use crate::layout::preview_file_name;
use crate::resolver::ModelDescriptor;
use crate::storage::{self, PartFile};

use progress::ConsoleProgress;

/// What a fetch operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    /// Destination already present; nothing was transferred.
    Skipped { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u32 },
    #[error(transparent)]
    Transport(#[from] HttpError),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("preview is not a decodable image: {0}")]
    Image(#[from] image::ImageError),
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> FetchError + '_ {
    move |source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Downloads model files and previews into a destination folder.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: HttpClient,
    show_progress: bool,
}

impl Fetcher {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            show_progress: true,
        }
    }

    /// Enable or disable the console progress line.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Stream `descriptor.download_url` to `folder/file_name`.
    ///
    /// The body goes to a `.part` file that is renamed on success and removed
    /// on failure. A non-200 response creates no file at all.
    pub fn fetch_model(
        &self,
        descriptor: &ModelDescriptor,
        folder: &Path,
    ) -> Result<FetchOutcome, FetchError> {
        let path = folder.join(&descriptor.file_name);
        if path.exists() {
            tracing::info!(path = %path.display(), "model already present, skipping");
            return Ok(FetchOutcome::Skipped { path });
        }
        storage::ensure_folder(folder).map_err(io_err(folder))?;

        let url = descriptor.download_url.as_str();
        let mut part: Option<PartFile> = None;
        let mut progress = ConsoleProgress::new(self.show_progress);

        let result = self.http.get_streamed(url, |head, chunk| {
            if part.is_none() {
                part = Some(PartFile::create(&path)?);
            }
            if let Some(file) = part.as_mut() {
                file.write_chunk(chunk)?;
                progress.update(file.bytes_written(), head.content_length);
            }
            Ok(())
        });

        let head = match result {
            Ok(head) => head,
            Err(e) => {
                progress.end_line();
                if let Some(part) = part {
                    part.discard();
                }
                return Err(e.into());
            }
        };
        if !head.is_ok() {
            progress.end_line();
            if let Some(part) = part {
                part.discard();
            }
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: head.status,
            });
        }

        // A 200 with an empty body never reached the chunk callback.
        let part = match part {
            Some(part) => part,
            None => PartFile::create(&path).map_err(io_err(&path))?,
        };
        progress.finish(part.bytes_written(), head.content_length);
        let bytes = part.finalize().map_err(io_err(&path))?;
        tracing::info!(path = %path.display(), bytes, "model downloaded");
        Ok(FetchOutcome::Downloaded { path, bytes })
    }

    /// Save the first preview image of the first model version as
    /// `folder/<file stem>.png`, re-encoding non-PNG sources.
    ///
    /// Returns `Ok(None)` when the catalog lists no preview image.
    pub fn fetch_preview(
        &self,
        descriptor: &ModelDescriptor,
        folder: &Path,
    ) -> Result<Option<FetchOutcome>, FetchError> {
        let url = match descriptor.preview_url() {
            Some(url) => url,
            None => return Ok(None),
        };
        let path = folder.join(preview_file_name(&descriptor.file_name));
        if path.exists() {
            tracing::info!(path = %path.display(), "preview already present, skipping");
            return Ok(Some(FetchOutcome::Skipped { path }));
        }

        let response = self.http.get(url)?;
        if !response.head.is_ok() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.head.status,
            });
        }

        let bytes = if preview::needs_reencode(url) {
            tracing::debug!(url, "re-encoding preview to PNG");
            reencode_png(&response.body)?
        } else {
            response.body
        };

        storage::ensure_folder(folder).map_err(io_err(folder))?;
        let mut part = PartFile::create(&path).map_err(io_err(&path))?;
        if let Err(e) = part.write_chunk(&bytes) {
            part.discard();
            return Err(io_err(&path)(e));
        }
        let written = part.finalize().map_err(io_err(&path))?;
        tracing::info!(path = %path.display(), bytes = written, "preview saved");
        Ok(Some(FetchOutcome::Downloaded {
            path,
            bytes: written,
        }))
    }
}
