//! Error types for the pdf2png library.
//!
//! Every failure the converter can hit is a variant of [`Pdf2PngError`].
//! Variants are fine-grained so callers can match on them, while
//! [`Pdf2PngError::kind`] folds them into the six coarse [`ErrorKind`]s the
//! CLI reports on.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse failure category of a [`Pdf2PngError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The input PDF does not exist.
    NotFound,
    /// Wrong extension, not a regular file, or a non-positive DPI.
    InvalidInput,
    /// The output directory could not be created.
    Io,
    /// The PDFium engine is missing or could not be loaded.
    Engine,
    /// The engine could not turn the document into page images.
    Decode,
    /// Anything else.
    Unexpected,
}

/// All errors returned by the pdf2png library.
#[derive(Debug, Error)]
pub enum Pdf2PngError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file '{}' does not exist.", path.display())]
    FileNotFound { path: PathBuf },

    /// The path exists but is a directory, socket, etc.
    #[error("'{}' is not a valid file.", path.display())]
    NotAFile { path: PathBuf },

    /// The path does not carry a `.pdf` extension.
    #[error("'{}' is not a PDF file.", path.display())]
    NotAPdf { path: PathBuf },

    /// DPI was zero or negative.
    #[error("DPI must be a positive integer.")]
    InvalidDpi { dpi: i64 },

    /// `create_dir_all` on the output directory failed.
    #[error("Could not create output directory '{}'. {source}", path.display())]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Engine errors ─────────────────────────────────────────────────────
    /// libpdfium could not be located, downloaded or bound.
    #[error("PDFium engine unavailable: {0}")]
    EngineUnavailable(String),

    /// PDFium refused to open the document.
    #[error("PDF '{}' could not be decoded: {detail}", path.display())]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{}' is encrypted and requires a password.", path.display())]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{}'", path.display())]
    WrongPassword { path: PathBuf },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The PNG encoder could not write a page image.
    #[error("Failed to write '{}': {source}", path.display())]
    PageWriteFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2PngError {
    /// The coarse category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::NotAFile { .. } | Self::NotAPdf { .. } | Self::InvalidDpi { .. } => {
                ErrorKind::InvalidInput
            }
            Self::OutputDirFailed { .. } => ErrorKind::Io,
            Self::EngineUnavailable(_) => ErrorKind::Engine,
            Self::CorruptPdf { .. }
            | Self::PasswordRequired { .. }
            | Self::WrongPassword { .. }
            | Self::RasterisationFailed { .. } => ErrorKind::Decode,
            Self::PageWriteFailed { .. } | Self::Internal(_) => ErrorKind::Unexpected,
        }
    }

    /// The single line written to the log when a conversion of `pdf_path`
    /// fails with this error.
    pub fn log_line(&self, pdf_path: &Path) -> String {
        match self.kind() {
            ErrorKind::NotFound | ErrorKind::InvalidInput | ErrorKind::Io => {
                format!("Error: {self}")
            }
            ErrorKind::Engine => {
                "Error: PDFium is not installed or cannot be found. Install it to proceed."
                    .to_string()
            }
            ErrorKind::Decode => format!(
                "Error: Failed to convert PDF '{}' to images.",
                pdf_path.display()
            ),
            ErrorKind::Unexpected => format!("Unexpected error: {self}"),
        }
    }
}
