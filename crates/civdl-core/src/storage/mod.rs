//! Disk I/O and file lifecycle.
//!
//! Bodies are streamed into `<final>.part` and renamed to the final name only
//! after the transfer succeeded, so an interrupted download never looks like
//! a finished file to the next run's existence check.

mod writer;

pub use writer::PartFile;

use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `x.safetensors` → `x.safetensors.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Create `folder` and its parents if missing; an existing folder is not an error.
pub fn ensure_folder(folder: &Path) -> std::io::Result<()> {
    if folder.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(folder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("x.safetensors"));
        assert_eq!(p.to_string_lossy(), "x.safetensors.part");
        let p2 = temp_path(Path::new("/tmp/LORA/a.pt"));
        assert_eq!(p2.to_string_lossy(), "/tmp/LORA/a.pt.part");
    }

    #[test]
    fn ensure_folder_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("base").join("Checkpoint");
        ensure_folder(&folder).unwrap();
        assert!(folder.is_dir());
        ensure_folder(&folder).unwrap();
        assert!(folder.is_dir());
    }

    #[test]
    fn part_file_finalize_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.bin");

        let mut part = PartFile::create(&final_path).unwrap();
        part.write_chunk(b"hello ").unwrap();
        part.write_chunk(b"world").unwrap();
        assert_eq!(part.bytes_written(), 11);
        assert!(temp_path(&final_path).exists());
        assert!(!final_path.exists());
        let n = part.finalize().unwrap();
        assert_eq!(n, 11);
        assert!(!temp_path(&final_path).exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"hello world");

        let other = dir.path().join("other.bin");
        let mut part = PartFile::create(&other).unwrap();
        part.write_chunk(b"partial").unwrap();
        part.discard();
        assert!(!temp_path(&other).exists());
        assert!(!other.exists());
    }
}
