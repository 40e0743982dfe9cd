//! Request validation: the only gate between user input and the engine.
//!
//! Checks run in a fixed order (input path, output directory, DPI) and the
//! first failure aborts. Nothing is rendered or written unless all of them
//! pass, so an invalid request never leaves page images behind. The one side
//! effect is creating the output directory.

use crate::config::ConversionRequest;
use crate::error::Pdf2PngError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A request that passed [`validate`]. Only this type can be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub pdf_path: PathBuf,
    pub output_dir: PathBuf,
    pub dpi: u32,
    pub password: Option<String>,
    pub max_rendered_pixels: Option<u32>,
}

impl ValidatedRequest {
    /// File name without extension; the naming root of every page image.
    pub fn stem(&self) -> String {
        self.pdf_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name including extension, for log lines.
    pub fn file_name(&self) -> String {
        self.pdf_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Validate `request` and create its output directory.
pub fn validate(request: &ConversionRequest) -> Result<ValidatedRequest, Pdf2PngError> {
    validate_pdf_path(&request.pdf_path)?;
    debug!("Input PDF ok: {}", request.pdf_path.display());

    let output_dir = request.resolved_output_dir();
    validate_output_dir(&output_dir)?;
    debug!("Output directory ready: {}", output_dir.display());

    let dpi = validate_dpi(request.dpi)?;
    debug!("DPI ok: {}", dpi);

    Ok(ValidatedRequest {
        pdf_path: request.pdf_path.clone(),
        output_dir,
        dpi,
        password: request.password.clone(),
        max_rendered_pixels: request.max_rendered_pixels,
    })
}

/// The path must exist, be a regular file and carry a `.pdf` extension
/// (any case).
pub fn validate_pdf_path(path: &Path) -> Result<(), Pdf2PngError> {
    if !path.exists() {
        return Err(Pdf2PngError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(Pdf2PngError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    if !has_pdf_extension(path) {
        return Err(Pdf2PngError::NotAPdf {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Create `dir` and any missing parents. An existing directory is fine.
pub fn validate_output_dir(dir: &Path) -> Result<(), Pdf2PngError> {
    std::fs::create_dir_all(dir).map_err(|source| Pdf2PngError::OutputDirFailed {
        path: dir.to_path_buf(),
        source,
    })
}

/// DPI must be a positive integer that fits the renderer's `u32`.
pub fn validate_dpi(dpi: i64) -> Result<u32, Pdf2PngError> {
    if dpi <= 0 {
        return Err(Pdf2PngError::InvalidDpi { dpi });
    }
    u32::try_from(dpi).map_err(|_| Pdf2PngError::InvalidDpi { dpi })
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
