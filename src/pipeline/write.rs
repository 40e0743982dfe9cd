//! Page output: `DynamicImage` → `{stem}_page_{n}.png` on disk.
//!
//! PNG is always requested explicitly rather than inferred from the file
//! extension, so a stem containing dots cannot change the encoder.

use crate::error::Pdf2PngError;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name for the 1-based page `index` of a document named `stem`.
pub fn page_file_name(stem: &str, index: usize) -> String {
    format!("{stem}_page_{index}.png")
}

/// Write `image` as `{dir}/{stem}_page_{index}.png`, replacing any existing
/// file of that name.
pub fn write_page(
    image: &DynamicImage,
    dir: &Path,
    stem: &str,
    index: usize,
) -> Result<PathBuf, Pdf2PngError> {
    let path = dir.join(page_file_name(stem, index));
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| Pdf2PngError::PageWriteFailed {
            path: path.clone(),
            source,
        })?;
    debug!(
        "Wrote {}x{} px → {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(path)
}
