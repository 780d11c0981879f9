//! Destination layout: `<base?>/<modelType>/<fileName>` plus the `.png` preview.
//!
//! Catalog-provided names are used verbatim; `is_safe_component` only rejects
//! names that would leave the destination folder.

mod component;
mod extension;

pub use component::is_safe_component;
pub use extension::extension_from_url;

use std::path::{Path, PathBuf};

/// Preview files are always stored as PNG.
pub const PREVIEW_EXTENSION: &str = "png";

/// Folder that holds models of `model_type`: `base/model_type`, or just
/// `model_type` (relative to the working directory) when no base is set.
pub fn destination_folder(base: Option<&Path>, model_type: &str) -> PathBuf {
    match base {
        Some(base) if !base.as_os_str().is_empty() => base.join(model_type),
        _ => PathBuf::from(model_type),
    }
}

/// Preview file name for a model file: extension replaced by `.png`.
///
/// # Examples
///
/// - `preview_file_name("x.safetensors")` → `"x.png"`
/// - `preview_file_name("archive.tar.gz")` → `"archive.tar.png"`
/// - `preview_file_name("noext")` → `"noext.png"`
pub fn preview_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("{}.{}", stem, PREVIEW_EXTENSION)
}
