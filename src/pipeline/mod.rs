//! Pipeline stages for PDF-to-PNG conversion.
//!
//! ```text
//! validate ──▶ render ──▶ write
//! (checks)     (pdfium)   (png files)
//! ```
//!
//! 1. [`validate`] — check the request and create the output directory
//! 2. [`render`]   — rasterise every page; blocking, so the async entry
//!    point runs it in `spawn_blocking`
//! 3. [`write`]    — PNG-encode each page under its deterministic name

pub mod render;
pub mod validate;
pub mod write;
