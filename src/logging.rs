//! Log sink construction.
//!
//! [`build_subscriber`] returns a subscriber value instead of installing
//! one. The binary installs it process-wide; tests scope one to a closure
//! with `tracing::subscriber::with_default` and read back the log file.
//!
//! Lines look like `2025-02-03T10:15:42.123456Z  INFO Saved: out/a_page_1.png`.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

/// Where log lines go and how verbose they are.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Default level directive (`"info"`, `"debug"`, `"error"` …).
    pub level: String,
    /// Let `RUST_LOG` override `level`.
    pub use_env_filter: bool,
    /// Mirror every line to standard output.
    pub stdout: bool,
    /// Append every line to this file, creating it (and its parent) if needed.
    pub log_file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            use_env_filter: true,
            stdout: true,
            log_file: Some(crate::config::default_log_file()),
        }
    }
}

/// Build a subscriber for `options`.
///
/// # Errors
/// The log file (or its directory) could not be opened for appending.
pub fn build_subscriber(
    options: &LogOptions,
) -> io::Result<impl Subscriber + Send + Sync + 'static> {
    let filter = if options.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level))
    } else {
        EnvFilter::new(&options.level)
    };

    let file = match &options.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Some(Arc::new(
                OpenOptions::new().create(true).append(true).open(path)?,
            ))
        }
        None => None,
    };

    let writer = match (options.stdout, file) {
        (true, Some(file)) => BoxMakeWriter::new(io::stdout.and(file)),
        (true, None) => BoxMakeWriter::new(io::stdout),
        (false, Some(file)) => BoxMakeWriter::new(file),
        (false, None) => BoxMakeWriter::new(io::sink),
    };

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .finish())
}
