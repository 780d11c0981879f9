//! Sequential writer for `.part` download files.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temp file receiving a body chunk by chunk; becomes the final file on `finalize`.
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Create (or truncate) the `.part` file next to `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = super::temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(PartFile {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Sync and rename the temp file to the final path. Returns bytes written.
    pub fn finalize(self) -> io::Result<u64> {
        self.file.sync_all()?;
        drop(self.file);
        std::fs::rename(&self.temp_path, &self.final_path)?;
        Ok(self.written)
    }

    /// Drop the temp file after a failed transfer.
    pub fn discard(self) {
        drop(self.file);
        if let Err(e) = std::fs::remove_file(&self.temp_path) {
            tracing::warn!(path = %self.temp_path.display(), "could not remove partial file: {}", e);
        }
    }
}
