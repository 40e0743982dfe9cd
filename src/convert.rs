//! Conversion entry points.
//!
//! The pipeline is one linear pass: validate, render every page, write every
//! page. There is no retry and no partial-completion recovery; an error
//! stops the pass, and files already written stay on disk.
//!
//! | Function | Blocking | Errors |
//! |----------|----------|--------|
//! | [`convert`] | no (`spawn_blocking`) | returned |
//! | [`convert_sync`] / [`convert_with`] | yes | returned |
//! | [`convert_and_log`] / [`convert_and_log_with`] | yes | logged, swallowed |

use crate::config::ConversionRequest;
use crate::error::Pdf2PngError;
use crate::output::ConversionOutput;
use crate::pipeline::render::{PageRasterizer, PdfiumRasterizer};
use crate::pipeline::{validate, write};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Convert every page of `request.pdf_path` to PNG with PDFium.
///
/// Rendering runs on the blocking thread pool. The caller's current
/// `tracing` dispatcher is carried onto that thread so log lines reach the
/// same subscriber.
///
/// # Errors
/// Any validation, engine, decode or write failure.
pub async fn convert(request: &ConversionRequest) -> Result<ConversionOutput, Pdf2PngError> {
    convert_on_blocking_pool(request.clone(), Arc::new(PdfiumRasterizer::new())).await
}

/// [`convert`] with a caller-supplied rasterizer.
pub async fn convert_on_blocking_pool(
    request: ConversionRequest,
    rasterizer: Arc<dyn PageRasterizer>,
) -> Result<ConversionOutput, Pdf2PngError> {
    let dispatch = tracing::dispatcher::get_default(|d| d.clone());

    tokio::task::spawn_blocking(move || {
        tracing::dispatcher::with_default(&dispatch, || {
            convert_with(&request, rasterizer.as_ref())
        })
    })
    .await
    .map_err(|e| Pdf2PngError::Internal(format!("Conversion task panicked: {}", e)))?
}

/// Blocking [`convert`].
pub fn convert_sync(request: &ConversionRequest) -> Result<ConversionOutput, Pdf2PngError> {
    convert_with(request, &PdfiumRasterizer::new())
}

/// Run the pipeline on the current thread with `rasterizer`.
pub fn convert_with(
    request: &ConversionRequest,
    rasterizer: &dyn PageRasterizer,
) -> Result<ConversionOutput, Pdf2PngError> {
    let start = Instant::now();

    // ── Step 1: Validate ─────────────────────────────────────────────────
    let validated = validate::validate(request)?;

    info!(
        "Converting '{}' to PNG images at {} DPI...",
        validated.file_name(),
        validated.dpi
    );
    info!("Saving images to: {}", validated.output_dir.display());

    // ── Step 2: Rasterise all pages ──────────────────────────────────────
    let images = rasterizer.rasterize(
        &validated.pdf_path,
        validated.dpi,
        validated.password.as_deref(),
        validated.max_rendered_pixels,
    )?;

    // ── Step 3: Write pages in order ─────────────────────────────────────
    let stem = validated.stem();
    let mut pages = Vec::with_capacity(images.len());
    for (i, image) in images.into_iter().enumerate() {
        let path = write::write_page(&image, &validated.output_dir, &stem, i + 1)?;
        info!("Saved: {}", path.display());
        pages.push(path);
    }

    info!("PDF conversion completed successfully.");

    Ok(ConversionOutput {
        output_dir: validated.output_dir,
        dpi: validated.dpi,
        pages,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Convert with PDFium, logging any failure instead of returning it.
///
/// Returns `None` when the conversion failed; the reason is already in the
/// log.
pub fn convert_and_log(request: &ConversionRequest) -> Option<ConversionOutput> {
    convert_and_log_with(request, &PdfiumRasterizer::new())
}

/// [`convert_and_log`] with a caller-supplied rasterizer.
///
/// A panic inside the engine is caught and logged like any other
/// unexpected error.
pub fn convert_and_log_with(
    request: &ConversionRequest,
    rasterizer: &dyn PageRasterizer,
) -> Option<ConversionOutput> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| convert_with(request, rasterizer)))
        .unwrap_or_else(|payload| Err(Pdf2PngError::Internal(panic_message(payload.as_ref()))));

    match result {
        Ok(output) => Some(output),
        Err(e) => {
            error!("{}", e.log_line(&request.pdf_path));
            debug!("Conversion failure detail ({:?}): {}", e.kind(), e);
            None
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("conversion panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("conversion panicked: {s}")
    } else {
        "conversion panicked".to_string()
    }
}
