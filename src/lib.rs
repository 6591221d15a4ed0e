//! icosweep - Concurrent Icon Harvester
//!
//! A cross-platform Rust CLI application that walks a directory tree, extracts
//! embedded icons from executables, libraries and `.ico` files, deduplicates
//! them by pixel content (BLAKE3), and stores each unique icon as a PNG file
//! bucketed by resolution.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};

pub mod cli;
pub mod decoder;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod scanner;
pub mod sizes;

use cli::Cli;
use decoder::SystemDecoder;
use error::ExitCode;
use pipeline::{Pipeline, PipelineConfig};

/// Run the application with parsed CLI arguments.
///
/// Validates the source directory, creates the destination root, runs the
/// extraction pipeline and prints the final summary. Startup failures
/// (nonexistent source) return [`ExitCode::StartupError`] without doing any
/// work; per-file failures during the run are reported by the pipeline and
/// never reach this level.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if !cli.source.is_dir() {
        eprintln!("Source directory does not exist: {}", cli.source.display());
        eprintln!("Usage: icosweep <SOURCE> <DEST>");
        return Ok(ExitCode::StartupError);
    }

    fs::create_dir_all(&cli.destination).with_context(|| {
        format!(
            "failed to create destination directory {}",
            cli.destination.display()
        )
    })?;

    let config = PipelineConfig::new(cli.destination.clone())
        .with_extensions(cli.extensions.clone())
        .with_workers(cli.workers);

    let pipeline = Pipeline::new(config, Arc::new(SystemDecoder));
    let summary = pipeline.run(&cli.source)?;

    if !cli.quiet {
        println!("{}", summary.render(&cli.source, &cli.destination));
    }

    Ok(ExitCode::Success)
}
