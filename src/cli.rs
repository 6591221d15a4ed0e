//! Command-line interface definitions for icosweep.
//!
//! This module defines all CLI arguments using the clap derive API. The
//! surface is intentionally small: a source tree to scan, a destination root
//! for extracted icons, and a handful of tuning flags.
//!
//! # Example
//!
//! ```bash
//! # Harvest icons from Program Files into ./icons
//! icosweep "C:/Program Files" ./icons
//!
//! # Scan additional container extensions
//! icosweep ./bin ./icons --ext exe --ext dll --ext ico --ext scr
//!
//! # Verbose mode for debugging
//! icosweep -v ./bin ./icons
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Concurrent icon harvester.
///
/// icosweep walks a directory tree, extracts the primary icon from every
/// executable, library and icon file it finds, deduplicates icons by pixel
/// content, and saves each unique icon as a PNG grouped by resolution.
#[derive(Debug, Parser)]
#[command(name = "icosweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory tree to scan for icon-bearing files
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory where extracted icons are written (created if absent)
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// File extensions to scan, without the dot (can be specified multiple times)
    ///
    /// Matching is case-insensitive.
    #[arg(
        long = "ext",
        value_name = "EXT",
        default_values_t = ["exe".to_string(), "dll".to_string(), "ico".to_string()]
    )]
    pub extensions: Vec<String>,

    /// Number of worker threads (default: host CPU count)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
