//! Icon decoding behind an explicit trait seam.
//!
//! # Overview
//!
//! Pulling an icon out of a file is platform- and format-specific binary
//! work; the pipeline only needs `decode(path, kind) -> bitmap or nothing`.
//! [`IconDecoder`] is that seam. The default [`SystemDecoder`] parses `.ico`
//! containers portably and defers executable/library extraction to the
//! platform (Windows shell APIs; other platforms have no such capability and
//! report "no icon").
//!
//! Decode outcomes distinguish two failure shapes:
//! - `Ok(None)` - the file is readable but holds no usable icon (absent
//!   resource, corrupt container). Expected and silent.
//! - `Err(DecodeError)` - the file itself could not be read. Reported at the
//!   per-file boundary, but never fatal to the run.

mod ico;
mod platform;

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::scanner::CandidateKind;

pub use self::ico::decode_ico_file;

/// Errors raised while reading a candidate file for decoding.
///
/// Parse-level failures are not errors; they decode to `None`.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The candidate file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path of the unreadable file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Extracts the primary icon from a candidate file.
///
/// Implementations return at most one icon per file, at the best native
/// resolution the source offers. The pipeline holds decoders behind
/// `Arc<dyn IconDecoder>`, so tests can substitute their own.
pub trait IconDecoder: Send + Sync {
    /// Decode the primary icon of `path`.
    fn decode(&self, path: &Path, kind: CandidateKind) -> Result<Option<RgbaImage>, DecodeError>;
}

/// Default decoder backed by the `ico` crate and the platform shell.
#[derive(Debug, Default)]
pub struct SystemDecoder;

impl IconDecoder for SystemDecoder {
    fn decode(&self, path: &Path, kind: CandidateKind) -> Result<Option<RgbaImage>, DecodeError> {
        match kind {
            CandidateKind::Ico => ico::decode_ico_file(path),
            CandidateKind::Executable => Ok(platform::decode_executable_icon(path)),
        }
    }
}
