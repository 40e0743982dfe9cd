//! # pdfium-fetch
//!
//! Find a usable PDFium shared library for `pdfium-render`, downloading it
//! into a per-user cache the first time it is needed.
//!
//! ## Resolution order
//!
//! 1. `PDFIUM_LIB_PATH`, when it names an existing file.
//! 2. The cache: `{cache}/pdf2png/pdfium-{VERSION}/{libname}`.
//! 3. A download of the platform archive from
//!    [bblanchon/pdfium-binaries](https://github.com/bblanchon/pdfium-binaries),
//!    extracted into the cache.
//!
//! [`bind`] walks that order and, if every step fails, falls back to
//! whatever the system loader finds (next to the executable, then the
//! library search path).
//!
//! ```rust,no_run
//! let pdfium = pdfium_fetch::bind().expect("PDFium unavailable");
//! ```
//!
//! ## Environment variables
//!
//! - `PDFIUM_LIB_PATH` — existing library to use; skips the cache.
//! - `PDFIUM_AUTO_CACHE_DIR` — replaces the platform cache directory.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use pdfium_render::prelude::Pdfium;
use thiserror::Error;
use tracing::{debug, info, warn};

/// pdfium-binaries release tag (`chromium/{VERSION}`).
pub const PDFIUM_VERSION: &str = "7690";

/// Explicit library path override.
pub const LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Cache directory override.
pub const CACHE_DIR_ENV: &str = "PDFIUM_AUTO_CACHE_DIR";

const RELEASES_URL: &str = "https://github.com/bblanchon/pdfium-binaries/releases/download";

/// Errors returned while locating or binding PDFium.
#[derive(Error, Debug)]
pub enum FetchError {
    /// No prebuilt archive exists for this OS/architecture.
    #[error("no prebuilt PDFium for {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The cache directory could not be created.
    #[error("cannot create PDFium cache directory: {0}")]
    CacheDir(#[source] std::io::Error),

    #[error("PDFium download failed: {0}")]
    Download(String),

    #[error("PDFium archive extraction failed: {0}")]
    Extract(String),

    /// `pdfium-render` could not load the library.
    #[error("cannot bind PDFium from {location}: {reason}")]
    Bind { location: String, reason: String },
}

/// Where the library came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    /// `PDFIUM_LIB_PATH`.
    Override(PathBuf),
    /// Found in the cache from an earlier run.
    Cached(PathBuf),
    /// Downloaded by this process.
    Downloaded(PathBuf),
}

impl LibrarySource {
    pub fn path(&self) -> &Path {
        match self {
            LibrarySource::Override(p)
            | LibrarySource::Cached(p)
            | LibrarySource::Downloaded(p) => p,
        }
    }
}

// ── Release assets ───────────────────────────────────────────────────────────

/// One prebuilt archive in the pdfium-binaries release.
#[derive(Debug, PartialEq, Eq)]
struct Asset {
    os: &'static str,
    arch: &'static str,
    archive: &'static str,
    /// Path of the shared library inside the archive.
    member: &'static str,
}

impl Asset {
    /// Name the library is stored under in the cache.
    fn lib_name(&self) -> &'static str {
        self.member.rsplit('/').next().unwrap_or(self.member)
    }

    fn url(&self) -> String {
        format!("{RELEASES_URL}/chromium%2F{PDFIUM_VERSION}/{}", self.archive)
    }
}

const fn asset(
    os: &'static str,
    arch: &'static str,
    archive: &'static str,
    member: &'static str,
) -> Asset {
    Asset {
        os,
        arch,
        archive,
        member,
    }
}

const ASSETS: &[Asset] = &[
    asset("macos", "aarch64", "pdfium-mac-arm64.tgz", "lib/libpdfium.dylib"),
    asset("macos", "x86_64", "pdfium-mac-x64.tgz", "lib/libpdfium.dylib"),
    asset("linux", "x86_64", "pdfium-linux-x64.tgz", "lib/libpdfium.so"),
    asset("linux", "aarch64", "pdfium-linux-arm64.tgz", "lib/libpdfium.so"),
    asset("windows", "x86_64", "pdfium-win-x64.tgz", "bin/pdfium.dll"),
    asset("windows", "aarch64", "pdfium-win-arm64.tgz", "bin/pdfium.dll"),
    asset("windows", "x86", "pdfium-win-x86.tgz", "bin/pdfium.dll"),
];

fn asset_for(os: &str, arch: &str) -> Result<&'static Asset, FetchError> {
    ASSETS
        .iter()
        .find(|a| a.os == os && a.arch == arch)
        .ok_or_else(|| FetchError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        })
}

fn current_asset() -> Result<&'static Asset, FetchError> {
    asset_for(std::env::consts::OS, std::env::consts::ARCH)
}

// ── Lookup ───────────────────────────────────────────────────────────────────

/// Per-version cache directory.
///
/// `$PDFIUM_AUTO_CACHE_DIR/pdfium-{VERSION}` when the override is set,
/// otherwise `{platform cache}/pdf2png/pdfium-{VERSION}`.
pub fn cache_dir() -> PathBuf {
    let versioned = format!("pdfium-{PDFIUM_VERSION}");
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV) {
        return PathBuf::from(dir).join(versioned);
    }

    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .unwrap_or_else(std::env::temp_dir)
        .join("pdf2png")
        .join(versioned)
}

/// Look for an already available library without touching the network.
pub fn find_library() -> Option<LibrarySource> {
    if let Some(p) = std::env::var_os(LIB_PATH_ENV).map(PathBuf::from) {
        if p.is_file() {
            return Some(LibrarySource::Override(p));
        }
        warn!("{} points at missing file {}", LIB_PATH_ENV, p.display());
    }

    let asset = current_asset().ok()?;
    let cached = cache_dir().join(asset.lib_name());
    cached.is_file().then_some(LibrarySource::Cached(cached))
}

static FETCHED: OnceLock<LibrarySource> = OnceLock::new();

/// Return a library path, downloading into the cache when nothing is found.
///
/// The download happens at most once per process.
pub fn fetch_library() -> Result<LibrarySource, FetchError> {
    if let Some(source) = FETCHED.get() {
        return Ok(source.clone());
    }

    let source = match find_library() {
        Some(found) => found,
        None => LibrarySource::Downloaded(download_to_cache(current_asset()?)?),
    };
    debug!("PDFium library: {:?}", source);

    // A concurrent caller may have won the race; both hold the same path.
    let _ = FETCHED.set(source.clone());
    Ok(source)
}

// ── Binding ──────────────────────────────────────────────────────────────────

/// Bind to PDFium, fetching it first if required, falling back to the
/// system loader.
pub fn bind() -> Result<Pdfium, FetchError> {
    let fetched = fetch_library().and_then(|source| bind_from_path(source.path()));
    match fetched {
        Ok(pdfium) => Ok(pdfium),
        Err(e) => {
            warn!("{e}; trying the system PDFium library");
            bind_system().map_err(|system| FetchError::Bind {
                location: "any known location".to_string(),
                reason: format!("{e}; system library: {system}"),
            })
        }
    }
}

/// Bind to the library at `path`. No lookup, no download.
pub fn bind_from_path(path: &Path) -> Result<Pdfium, FetchError> {
    Pdfium::bind_to_library(path)
        .map(Pdfium::new)
        .map_err(|e| FetchError::Bind {
            location: path.display().to_string(),
            reason: e.to_string(),
        })
}

fn bind_system() -> Result<Pdfium, FetchError> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| FetchError::Bind {
            location: "system".to_string(),
            reason: e.to_string(),
        })
}

// ── Download ─────────────────────────────────────────────────────────────────

fn download_to_cache(asset: &Asset) -> Result<PathBuf, FetchError> {
    let dir = cache_dir();
    std::fs::create_dir_all(&dir).map_err(FetchError::CacheDir)?;

    let url = asset.url();
    info!("Downloading PDFium {} from {}", PDFIUM_VERSION, url);
    let archive = download(&url)?;

    let dest = dir.join(asset.lib_name());
    extract_member(&archive, asset.member, &dest)?;
    info!("PDFium cached at {}", dest.display());
    Ok(dest)
}

fn download(url: &str) -> Result<Vec<u8>, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("pdfium-fetch/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| FetchError::Download(e.to_string()))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| FetchError::Download(format!("GET {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(FetchError::Download(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }

    let mut bytes = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    response
        .read_to_end(&mut bytes)
        .map_err(|e| FetchError::Download(format!("read error: {e}")))?;
    Ok(bytes)
}

/// Unpack the single entry `member` of a `.tgz` into `dest`.
///
/// The entry lands in a `.part` file first and is renamed into place, so an
/// interrupted extraction never leaves a truncated library in the cache.
fn extract_member(archive: &[u8], member: &str, dest: &Path) -> Result<(), FetchError> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let mut tgz = Archive::new(GzDecoder::new(archive));
    let entries = tgz
        .entries()
        .map_err(|e| FetchError::Extract(e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| FetchError::Extract(e.to_string()))?;
        let is_member = entry
            .path()
            .map_err(|e| FetchError::Extract(e.to_string()))?
            .to_string_lossy()
            == member;
        if !is_member {
            continue;
        }

        let part = dest.with_extension("part");
        entry
            .unpack(&part)
            .map_err(|e| FetchError::Extract(format!("unpack failed: {e}")))?;
        std::fs::rename(&part, dest)
            .map_err(|e| FetchError::Extract(format!("rename failed: {e}")))?;
        return Ok(());
    }

    Err(FetchError::Extract(format!("'{member}' not found in archive")))
}
