//! Iterative directory walker with an extension allow-set.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory tree
//! and discovering candidate files for icon extraction. Traversal is
//! iterative (an explicit directory stack, no recursion) and lazy: candidates
//! are produced as the consumer pulls them, which lets the worker pool start
//! before the walk finishes.
//!
//! Unreadable directories (permission denied, vanished mid-scan) are yielded
//! as per-node [`ScanError`] values and traversal continues. Callers that
//! only care about candidates can `filter_map(Result::ok)`; callers that want
//! to observe skips (tests do) look at the `Err` items.
//!
//! Traversal order is unspecified and must not be relied upon.
//!
//! # Example
//!
//! ```no_run
//! use icosweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let candidates: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} candidates", candidates.len());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::{ScanError, WalkerConfig};

/// Directory walker for candidate file discovery.
///
/// Yields files whose extension is in the configured allow-set
/// (case-insensitive). The root directory is not validated here; a missing
/// root surfaces as a single per-node error.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Check whether a file's extension is in the allow-set.
    fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.config
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }

    /// Walk the directory tree, yielding candidate paths.
    ///
    /// Returns a lazy iterator over per-node results: `Ok(path)` for each
    /// candidate file, `Err(ScanError)` for each directory that could not be
    /// listed. Errors never end the iteration. Each call restarts the
    /// traversal from the root.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            walker: self,
            dirs: vec![self.root.clone()],
            files: Vec::new(),
        }
    }
}

/// Lazy traversal state for one [`Walker::walk`] call.
///
/// Holds the explicit directory stack (depth-first) and a small buffer of
/// candidate files from the most recently listed directory.
#[derive(Debug)]
pub struct Walk<'a> {
    walker: &'a Walker,
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl Iterator for Walk<'_> {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.files.pop() {
                return Some(Ok(file));
            }

            let dir = self.dirs.pop()?;
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => return Some(Err(ScanError::from_io(dir, e))),
            };

            for entry in entries {
                // Entries that vanish between listing and inspection are
                // skipped like unreadable directories, just silently.
                let Ok(entry) = entry else { continue };
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                let path = entry.path();

                // file_type() does not follow symlinks, so a symlinked
                // directory is neither descended into (no link cycles) nor
                // yielded as a file.
                if file_type.is_dir() {
                    self.dirs.push(path);
                } else if file_type.is_file() && self.walker.matches_extension(&path) {
                    self.files.push(path);
                }
            }
        }
    }
}
