//! CLI binary for pdf2png.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ConversionRequest`, installs the logger and runs the conversion.
//!
//! Conversion failures are logged, not turned into an exit code, unless
//! `--strict` is given. Ctrl-C logs a warning and exits with status 1.

use anyhow::{Context, Result};
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::Parser;
use pdf2png::logging::{self, LogOptions};
use pdf2png::{convert_and_log, default_log_file, ConversionRequest, DEFAULT_DPI};
use std::path::PathBuf;
use std::process;
use tracing::{error, warn};

/// Exit status for a user interrupt.
const EXIT_INTERRUPTED: i32 = 1;
/// Exit status for a failed conversion under `--strict`.
const EXIT_FAILED: i32 = 2;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Every page of sample.pdf into ./out at 150 DPI
  pdf2png -p sample.pdf -o out -d 150
    → out/sample_page_1.png, out/sample_page_2.png, …

  # Default output directory (<install root>/output), 200 DPI
  pdf2png -p sample.pdf

  # Encrypted document, pages capped at 4000 px
  pdf2png -p secret.pdf --password hunter2 --max-pixels 4000

  # Machine-readable summary, non-zero exit on failure
  pdf2png -p sample.pdf --json --strict

EXIT STATUS:
  0  conversion finished (errors, if any, are in the log)
  1  interrupted by the user
  2  conversion failed (only with --strict)

ENVIRONMENT VARIABLES:
  PDF2PNG_HOME            Install root holding output/ and pdf_to_png.log
  PDFIUM_LIB_PATH         Path to an existing libpdfium, skips auto-download
  PDFIUM_AUTO_CACHE_DIR   Override the default pdfium cache directory
  RUST_LOG                Log filter, e.g. RUST_LOG=debug
"#;

/// Convert a PDF into PNG images.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2png",
    version,
    about = "Convert a PDF into PNG images.",
    long_about = "Convert every page of a PDF into its own PNG image, named \
{stem}_page_{n}.png. Pages are rendered with PDFium, which is downloaded and \
cached automatically on first run.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input PDF file.
    #[arg(
        short = 'p',
        long = "pdf_path",
        visible_alias = "pdf-path",
        env = "PDF2PNG_PDF_PATH"
    )]
    pdf_path: PathBuf,

    /// Directory where PNG files will be saved. Defaults to <install root>/output.
    ///
    /// An empty value means the default.
    #[arg(
        short = 'o',
        long = "output_dir",
        visible_alias = "output-dir",
        env = "PDF2PNG_OUTPUT_DIR",
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    output_dir: Option<PathBuf>,

    /// Resolution (DPI) for the PNG images.
    #[arg(short = 'd', long, env = "PDF2PNG_DPI", default_value_t = DEFAULT_DPI,
          allow_negative_numbers = true)]
    dpi: i64,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2PNG_PASSWORD")]
    password: Option<String>,

    /// Cap the longest edge of each page image, in pixels.
    #[arg(long, env = "PDF2PNG_MAX_PIXELS",
          value_parser = clap::value_parser!(u32).range(1..))]
    max_pixels: Option<u32>,

    /// Append log lines to this file. Defaults to <install root>/pdf_to_png.log.
    #[arg(long, env = "PDF2PNG_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log to standard output only.
    #[arg(long, env = "PDF2PNG_NO_LOG_FILE", conflicts_with = "log_file")]
    no_log_file: bool,

    /// Print a JSON summary of the written files on stdout (logs go to the file only).
    #[arg(long, env = "PDF2PNG_JSON")]
    json: bool,

    /// Exit with status 2 when the conversion fails.
    #[arg(long, env = "PDF2PNG_STRICT")]
    strict: bool,

    /// Enable DEBUG-level logs.
    #[arg(short, long, env = "PDF2PNG_VERBOSE")]
    verbose: bool,

    /// Suppress all log output except errors.
    #[arg(short, long, env = "PDF2PNG_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_options(&self) -> LogOptions {
        let level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        LogOptions {
            level: level.to_string(),
            use_env_filter: true,
            stdout: !self.json,
            log_file: if self.no_log_file {
                None
            } else {
                Some(self.log_file.clone().unwrap_or_else(default_log_file))
            },
        }
    }

    fn request(&self) -> ConversionRequest {
        let mut request = ConversionRequest::new(&self.pdf_path).dpi(self.dpi);
        if let Some(dir) = self.output_dir.as_ref().filter(|d| !d.as_os_str().is_empty()) {
            request = request.output_dir(dir);
        }
        if let Some(ref pwd) = self.password {
            request = request.password(pwd);
        }
        if let Some(px) = self.max_pixels {
            request = request.max_rendered_pixels(px);
        }
        request
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let options = cli.log_options();
    let subscriber = logging::build_subscriber(&options).with_context(|| {
        format!(
            "Failed to open log file {:?}",
            options.log_file.as_deref().unwrap_or(std::path::Path::new("-"))
        )
    })?;
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;

    // ── Run conversion ───────────────────────────────────────────────────
    // PDFium blocks; the signal listener stays on the async side. A blocking
    // task cannot be cancelled, so an interrupt exits the process directly.
    // A failed join is one more unexpected error: logged, then the normal
    // exit path.
    let request = cli.request();
    let task = tokio::task::spawn_blocking(move || convert_and_log(&request));

    let output = tokio::select! {
        joined = task => joined.unwrap_or_else(|e| {
            error!("Unexpected error: Conversion task failed: {e}");
            None
        }),
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("Process interrupted by user.");
            process::exit(EXIT_INTERRUPTED);
        }
    };

    match output {
        Some(output) if cli.json => {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        }
        Some(_) => {}
        None if cli.strict => process::exit(EXIT_FAILED),
        None => {}
    }

    Ok(())
}
