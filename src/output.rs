//! Result of a successful conversion.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a conversion wrote to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Directory the page images were written to.
    pub output_dir: PathBuf,
    /// Resolution the pages were rendered at.
    pub dpi: u32,
    /// Written files in page order; `pages[0]` is `{stem}_page_1.png`.
    pub pages: Vec<PathBuf>,
    /// Wall-clock time from validation to the last write.
    pub duration_ms: u64,
}

impl ConversionOutput {
    /// Number of pages written.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
