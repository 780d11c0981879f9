//! Preview normalization to PNG.

use image::ImageFormat;
use std::io::Cursor;

use crate::layout::{extension_from_url, PREVIEW_EXTENSION};

/// True if the image behind `url` must be re-encoded before saving as `.png`.
pub(crate) fn needs_reencode(url: &str) -> bool {
    extension_from_url(url).as_deref() != Some(PREVIEW_EXTENSION)
}

/// Decode `bytes` (format sniffed from content) and encode as PNG.
pub fn reencode_png(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
