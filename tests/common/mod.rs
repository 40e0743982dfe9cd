//! Shared helpers for the integration tests.
//!
//! The fake rasterizer stands in for PDFium so the pipeline can be exercised
//! without the native library; log output is captured in a file per test.

#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbaImage};
use pdf2png::logging::{build_subscriber, LogOptions};
use pdf2png::{PageRasterizer, Pdf2PngError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// How the fake engine behaves.
pub enum Behaviour {
    /// Return this many distinct page images.
    Pages(usize),
    /// Fail as if libpdfium were missing.
    EngineMissing,
    /// Fail as if the document were corrupt.
    Corrupt,
    /// Panic inside the engine call.
    Panic,
}

/// A `PageRasterizer` that records its calls.
pub struct FakeRasterizer {
    behaviour: Behaviour,
    calls: Mutex<Vec<(PathBuf, u32)>>,
}

impl FakeRasterizer {
    pub fn pages(n: usize) -> Self {
        Self::new(Behaviour::Pages(n))
    }

    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(pdf_path, dpi)` for every call so far.
    pub fn calls(&self) -> Vec<(PathBuf, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageRasterizer for FakeRasterizer {
    fn rasterize(
        &self,
        pdf_path: &Path,
        dpi: u32,
        _password: Option<&str>,
        _max_rendered_pixels: Option<u32>,
    ) -> Result<Vec<DynamicImage>, Pdf2PngError> {
        self.calls
            .lock()
            .unwrap()
            .push((pdf_path.to_path_buf(), dpi));

        match self.behaviour {
            // Page n is n+1 pixels wide so tests can tell pages apart.
            Behaviour::Pages(n) => Ok((0..n)
                .map(|i| {
                    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                        i as u32 + 1,
                        2,
                        Rgba([0, 0, 255, 255]),
                    ))
                })
                .collect()),
            Behaviour::EngineMissing => Err(Pdf2PngError::EngineUnavailable(
                "libpdfium.so: cannot open shared object file".into(),
            )),
            Behaviour::Corrupt => Err(Pdf2PngError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: "PdfiumLibraryInternalError(FormatError)".into(),
            }),
            Behaviour::Panic => panic!("bitmap handle was null"),
        }
    }
}

/// Write a file that passes validation (the fake engine never reads it).
pub fn fake_pdf(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, b"%PDF-1.7\n%%EOF\n").unwrap();
    p
}

/// Run `f` with logging captured into `log`; return the log text.
pub fn with_captured_log<T>(log: &Path, f: impl FnOnce() -> T) -> (T, String) {
    let subscriber = build_subscriber(&LogOptions {
        level: "info".to_string(),
        use_env_filter: false,
        stdout: false,
        log_file: Some(log.to_path_buf()),
    })
    .expect("log file should open");

    let value = tracing::subscriber::with_default(subscriber, f);
    let text = std::fs::read_to_string(log).unwrap_or_default();
    (value, text)
}

/// PNG files in `dir`, sorted by name.
pub fn pngs_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}
