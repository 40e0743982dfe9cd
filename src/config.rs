//! Conversion request and filesystem defaults.
//!
//! A [`ConversionRequest`] carries everything one conversion needs. It is
//! built with [`ConversionRequest::new`] plus chained setters and is never
//! validated on construction: checking the request is the job of
//! [`crate::pipeline::validate::validate`], so a bad request fails (and is
//! logged) the same way as any other conversion error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rendering DPI used when none is given.
pub const DEFAULT_DPI: i64 = 200;

/// Environment variable that relocates the install root.
pub const HOME_ENV: &str = "PDF2PNG_HOME";

/// Name of the directory, under the install root, that receives images when
/// no output directory is given.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "output";

/// Name of the run log kept under the install root.
pub const DEFAULT_LOG_FILE_NAME: &str = "pdf_to_png.log";

/// A single PDF-to-PNG conversion.
///
/// # Example
/// ```rust
/// use pdf2png::ConversionRequest;
///
/// let request = ConversionRequest::new("slides.pdf")
///     .output_dir("out")
///     .dpi(150);
/// assert_eq!(request.dpi, 150);
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Input PDF. Must exist, be a regular file and end in `.pdf`.
    pub pdf_path: PathBuf,

    /// Directory receiving the page images. `None` means
    /// [`default_output_dir`]. Created (with parents) when missing.
    pub output_dir: Option<PathBuf>,

    /// Rendering resolution. Must be positive. Default: 200.
    ///
    /// Signed so that a zero or negative value coming from the command line
    /// reaches validation instead of being rejected by the argument parser.
    pub dpi: i64,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Optional cap on the longest edge of each rendered page, in pixels.
    ///
    /// A 600-DPI render of an A0 poster is tens of thousands of pixels per
    /// side; the cap scales such pages down proportionally.
    pub max_rendered_pixels: Option<u32>,
}

impl std::fmt::Debug for ConversionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionRequest")
            .field("pdf_path", &self.pdf_path)
            .field("output_dir", &self.output_dir)
            .field("dpi", &self.dpi)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .finish()
    }
}

impl ConversionRequest {
    /// Start a request for `pdf_path` with every other field at its default.
    pub fn new(pdf_path: impl Into<PathBuf>) -> Self {
        Self {
            pdf_path: pdf_path.into(),
            output_dir: None,
            dpi: DEFAULT_DPI,
            password: None,
            max_rendered_pixels: None,
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn dpi(mut self, dpi: i64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.password = Some(pwd.into());
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.max_rendered_pixels = Some(px);
        self
    }

    /// The output directory this request resolves to. An empty path counts
    /// as no path.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(default_output_dir)
    }
}

/// Root directory the default output folder and log file live under.
///
/// `PDF2PNG_HOME` wins when set; otherwise the directory above the one
/// holding the running executable (`<root>/bin/pdf2png` gives `<root>`).
pub fn install_root() -> PathBuf {
    match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::current_exe()
            .map(|exe| root_for_exe(&exe))
            .unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn root_for_exe(exe: &Path) -> PathBuf {
    let non_empty = |p: &&Path| !p.as_os_str().is_empty();
    let bin_dir = exe.parent().filter(non_empty);
    bin_dir
        .and_then(Path::parent)
        .filter(non_empty)
        .or(bin_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<install_root>/output`
pub fn default_output_dir() -> PathBuf {
    install_root().join(DEFAULT_OUTPUT_DIR_NAME)
}

/// `<install_root>/pdf_to_png.log`
pub fn default_log_file() -> PathBuf {
    install_root().join(DEFAULT_LOG_FILE_NAME)
}
