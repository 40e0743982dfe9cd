//! # pdf2png
//!
//! Convert every page of a PDF document into its own PNG image.
//!
//! Rendering is delegated to PDFium through `pdfium-render`; this crate
//! validates the request, drives the engine and writes the pages as
//! `{stem}_page_{n}.png`, `n` counting from 1.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Validate  path exists, is a file, ends in .pdf; output dir; DPI > 0
//!  ├─ 2. Render    every page via pdfium, all pages held in memory
//!  └─ 3. Write     {output_dir}/{stem}_page_{n}.png, overwriting
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2png::{convert, ConversionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = ConversionRequest::new("sample.pdf").output_dir("out").dpi(150);
//!     let output = convert(&request).await?;
//!     for page in &output.pages {
//!         println!("{}", page.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | The `pdf2png` binary (clap + anyhow) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    default_log_file, default_output_dir, install_root, ConversionRequest, DEFAULT_DPI,
};
pub use convert::{
    convert, convert_and_log, convert_and_log_with, convert_on_blocking_pool, convert_sync,
    convert_with,
};
pub use error::{ErrorKind, Pdf2PngError};
pub use output::ConversionOutput;
pub use pipeline::render::{PageRasterizer, PdfiumRasterizer};
