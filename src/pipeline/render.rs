//! PDF rasterisation: turn every page of a PDF into a `DynamicImage`.
//!
//! [`PageRasterizer`] is the seam between the converter and the engine.
//! [`PdfiumRasterizer`] is the production implementation; tests plug in
//! their own so the pipeline can run without libpdfium.
//!
//! Rendering is blocking and CPU-bound. The async entry point in
//! [`crate::convert`] moves it onto a `spawn_blocking` thread.

use crate::error::Pdf2PngError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// PDF user space is defined at 72 units per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Produces one image per page, in document order.
///
/// All pages are returned at once; callers write them only after the whole
/// document has been rendered.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(
        &self,
        pdf_path: &Path,
        dpi: u32,
        password: Option<&str>,
        max_rendered_pixels: Option<u32>,
    ) -> Result<Vec<DynamicImage>, Pdf2PngError>;
}

/// Renders with PDFium.
///
/// The library is resolved through `pdfium-fetch` (env override, local
/// cache, download, then system library) unless an explicit path is set.
#[derive(Debug, Clone, Default)]
pub struct PdfiumRasterizer {
    library_path: Option<PathBuf>,
}

impl PdfiumRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to the library at `path` instead of resolving one.
    pub fn with_library_path(path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: Some(path.into()),
        }
    }

    fn bind(&self) -> Result<Pdfium, Pdf2PngError> {
        let bound = match &self.library_path {
            Some(path) => pdfium_fetch::bind_from_path(path),
            None => pdfium_fetch::bind(),
        };
        bound.map_err(|e| Pdf2PngError::EngineUnavailable(e.to_string()))
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(
        &self,
        pdf_path: &Path,
        dpi: u32,
        password: Option<&str>,
        max_rendered_pixels: Option<u32>,
    ) -> Result<Vec<DynamicImage>, Pdf2PngError> {
        let pdfium = self.bind()?;

        let document = pdfium
            .load_pdf_from_file(pdf_path, password)
            .map_err(|e| classify_load_error(pdf_path, password, &e))?;

        let pages = document.pages();
        info!("PDF loaded: {} pages", pages.len());

        let render_config = render_config(dpi, max_rendered_pixels);
        let mut images = Vec::with_capacity(pages.len() as usize);

        for (idx, page) in pages.iter().enumerate() {
            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                Pdf2PngError::RasterisationFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                }
            })?;

            let image = bitmap.as_image();
            debug!(
                "Rendered page {} → {}x{} px",
                idx + 1,
                image.width(),
                image.height()
            );
            images.push(image);
        }

        Ok(images)
    }
}

/// Scale factor that maps PDF points to pixels at `dpi`.
pub fn scale_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / POINTS_PER_INCH
}

fn render_config(dpi: u32, max_rendered_pixels: Option<u32>) -> PdfRenderConfig {
    let config = PdfRenderConfig::new().scale_page_by_factor(scale_for_dpi(dpi));
    match max_rendered_pixels {
        Some(px) => {
            let px = px.max(1) as i32;
            config.set_maximum_width(px).set_maximum_height(px)
        }
        None => config,
    }
}

/// PDFium reports password problems as a load failure; tell them apart from
/// a corrupt file.
fn classify_load_error(
    pdf_path: &Path,
    password: Option<&str>,
    err: &PdfiumError,
) -> Pdf2PngError {
    let detail = format!("{:?}", err);
    if detail.contains("Password") || detail.contains("password") {
        if password.is_some() {
            Pdf2PngError::WrongPassword {
                path: pdf_path.to_path_buf(),
            }
        } else {
            Pdf2PngError::PasswordRequired {
                path: pdf_path.to_path_buf(),
            }
        }
    } else {
        Pdf2PngError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail,
        }
    }
}
