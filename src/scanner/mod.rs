//! Scanner module for directory traversal and pixel hashing.
//!
//! This module provides functionality for:
//! - Lazy, iterative directory walking with an extension allow-set
//! - Content digests over normalized icon pixel buffers (BLAKE3)
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`hasher`]: BLAKE3 digests over canonical icon pixels
//!
//! # Example
//!
//! ```no_run
//! use icosweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("C:/Program Files"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("candidate: {}", path.display()),
//!         Err(e) => eprintln!("skipped: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};

pub use hasher::pixel_digest;
pub use walker::Walker;

/// How a candidate file is handed to the icon decoder.
///
/// Derived from the file extension: `.ico` files are icon containers, every
/// other member of the allow-set is treated as an executable/library whose
/// associated icon comes from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// A standalone `.ico` icon container.
    Ico,
    /// An executable or library with an embedded/associated icon.
    Executable,
}

impl CandidateKind {
    /// Classify a candidate path by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let is_ico = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("ico"));
        if is_ico {
            Self::Ico
        } else {
            Self::Executable
        }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// File extensions to accept, without the leading dot.
    /// Matching is case-insensitive.
    pub extensions: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["exe".to_string(), "dll".to_string(), "ico".to_string()],
        }
    }
}

impl WalkerConfig {
    /// Create a configuration with a custom extension allow-set.
    #[must_use]
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }
}

/// Errors that can occur during directory traversal.
///
/// These are per-node results: the walker yields them for directories it had
/// to skip and keeps going. Nothing here aborts a scan.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when listing a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The directory vanished between discovery and listing.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while listing a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while listing `path`.
    pub(crate) fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }
}
