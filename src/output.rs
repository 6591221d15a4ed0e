//! Output writer: collision-safe PNG persistence bucketed by resolution.
//!
//! # Overview
//!
//! Saved icons land under `<root>/<W>x<H>/<base>[_<n>].png`. The base name is
//! derived deterministically from the source file; uniqueness on disk comes
//! from the numeric-suffix scan in [`save_icon`]. The final open uses
//! exclusive-create semantics, so a name that appears between the existence
//! check and the open fails loudly instead of overwriting: two workers racing
//! the same base name is a documented, recoverable per-file error, never a
//! silent data loss.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

/// Characters that cannot appear in a file name on common filesystems.
const INVALID_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Errors that can occur while persisting an icon.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    /// The size-bucket directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        /// Bucket directory path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The destination file could not be created.
    ///
    /// With `AlreadyExists` this is the lost name race: another worker
    /// created the file between the existence check and the open.
    #[error("cannot create {path}: {source}")]
    Create {
        /// Destination file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding to the destination file failed.
    #[error("cannot encode {path}: {source}")]
    Encode {
        /// Destination file path
        path: PathBuf,
        /// The underlying image error
        #[source]
        source: image::ImageError,
    },

    /// Flushing encoded bytes to disk failed (e.g. disk full).
    #[error("cannot write {path}: {source}")]
    Write {
        /// Destination file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Derive the deterministic base name for a saved icon.
///
/// Strips the source file's extension, replaces filesystem-invalid characters
/// with `_`, and appends the canonical resolution as `_WIDTHxHEIGHT`. Pure:
/// identical inputs always give identical names; uniqueness on disk is
/// [`save_icon`]'s job.
#[must_use]
pub fn build_base_name(source: &Path, width: u32, height: u32) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "icon".to_string());

    let clean: String = stem
        .chars()
        .map(|c| if INVALID_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect();

    format!("{clean}_{width}x{height}")
}

/// Persist a canonical icon as a PNG under its size bucket.
///
/// Creates `<root>/<W>x<H>/` if absent, scans `base.png`, `base_1.png`, ...
/// for the first unused name, then opens it with exclusive-create semantics
/// and encodes the bitmap. Returns the path actually written.
///
/// The existence scan and the create are not one atomic step across workers;
/// a name grabbed in between surfaces as [`OutputError::Create`] with
/// `AlreadyExists` and the icon is dropped for this run.
pub fn save_icon(
    icon: &RgbaImage,
    output_root: &Path,
    base_name: &str,
) -> Result<PathBuf, OutputError> {
    let bucket = output_root.join(format!("{}x{}", icon.width(), icon.height()));
    fs::create_dir_all(&bucket).map_err(|source| OutputError::CreateDir {
        path: bucket.clone(),
        source,
    })?;

    let path = next_free_name(&bucket, base_name);

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| OutputError::Create {
            path: path.clone(),
            source,
        })?;

    let mut writer = BufWriter::new(file);
    icon.write_to(&mut writer, ImageFormat::Png)
        .map_err(|source| OutputError::Encode {
            path: path.clone(),
            source,
        })?;
    writer.flush().map_err(|source| OutputError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Find the first unused `base[_<n>].png` name in a bucket directory.
fn next_free_name(bucket: &Path, base_name: &str) -> PathBuf {
    let mut candidate = bucket.join(format!("{base_name}.png"));
    let mut suffix = 0u32;
    while candidate.exists() {
        suffix += 1;
        candidate = bucket.join(format!("{base_name}_{suffix}.png"));
    }
    candidate
}
