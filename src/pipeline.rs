//! Pipeline orchestrator: walks, decodes, dedupes and saves in parallel.
//!
//! # Overview
//!
//! The orchestrator wires the stages together per candidate file:
//!
//! 1. The [`Walker`](crate::scanner::Walker) feeds candidate paths from a
//!    single thread.
//! 2. A rayon pool (sized to host CPU parallelism, or the configured
//!    override) pulls candidates via `par_bridge`; each file's whole
//!    pipeline - decode, canonical resize, digest, admission, save - runs to
//!    completion on one worker.
//! 3. Per-file failures are caught at the file boundary, printed as
//!    `Error file <path>: <message>`, and never abort the run or other
//!    in-flight work.
//!
//! Shared mutable state is limited to the [`DedupRegistry`] and the three
//! atomic [`RunCounters`]. Which source file wins the save for a given digest
//! is unspecified across runs; the set of saved pixel contents is not.
//!
//! # Example
//!
//! ```no_run
//! use icosweep::decoder::SystemDecoder;
//! use icosweep::pipeline::{Pipeline, PipelineConfig};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let config = PipelineConfig::new("./icons".into());
//! let pipeline = Pipeline::new(config, Arc::new(SystemDecoder));
//! let summary = pipeline.run(Path::new("C:/Program Files")).unwrap();
//! println!("saved {} unique icons", summary.icons_saved);
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::iter::{ParallelBridge, ParallelIterator};

use crate::decoder::IconDecoder;
use crate::dedup::DedupRegistry;
use crate::output::{self, OutputError};
use crate::scanner::{pixel_digest, CandidateKind, ScanError, Walker, WalkerConfig};
use crate::sizes;

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory for saved icons (size buckets are created beneath it).
    pub output_root: PathBuf,
    /// Extension allow-set for the walker.
    pub extensions: Vec<String>,
    /// Worker thread count; `None` uses host CPU parallelism.
    pub workers: Option<usize>,
}

impl PipelineConfig {
    /// Create a configuration writing to the given output root.
    #[must_use]
    pub fn new(output_root: PathBuf) -> Self {
        Self {
            output_root,
            extensions: WalkerConfig::default().extensions,
            workers: None,
        }
    }

    /// Set the extension allow-set.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Override the worker thread count.
    #[must_use]
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }
}

/// Errors that prevent a pipeline run from starting.
///
/// Per-file errors never surface here; they are handled at the file boundary.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The worker pool could not be built.
    #[error("cannot build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Shared monotonic counters for one run.
///
/// Mutated only via atomic increments; no ordering is guaranteed between a
/// counter update and the work that produced it, only atomicity of each
/// increment.
#[derive(Debug, Default)]
pub struct RunCounters {
    scanned: AtomicU64,
    icon_bearing: AtomicU64,
    saved: AtomicU64,
}

impl RunCounters {
    fn record_scanned(&self) {
        self.scanned.fetch_add(1, Ordering::Relaxed);
    }

    fn record_icon_bearing(&self) {
        self.icon_bearing.fetch_add(1, Ordering::Relaxed);
    }

    fn record_saved(&self) {
        self.saved.fetch_add(1, Ordering::Relaxed);
    }
}

/// Final counters and timing for a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Candidate files pulled from the walker.
    pub files_scanned: u64,
    /// Files that yielded an icon.
    pub files_with_icons: u64,
    /// Unique icons persisted to disk.
    pub icons_saved: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl ScanSummary {
    /// Render the human-readable end-of-run summary.
    #[must_use]
    pub fn render(&self, source: &Path, destination: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Source:             {}", source.display());
        let _ = writeln!(out, "Destination:        {}", destination.display());
        let _ = writeln!(out, "Files scanned:      {}", self.files_scanned);
        let _ = writeln!(out, "Files with icons:   {}", self.files_with_icons);
        let _ = writeln!(out, "Unique icons saved: {}", self.icons_saved);
        let _ = write!(out, "Elapsed:            {:.2}s", self.elapsed.as_secs_f64());
        out
    }
}

/// The extraction pipeline.
///
/// Holds the run configuration and the icon decoder collaborator. The decoder
/// sits behind `Arc<dyn IconDecoder>` so platform decoding can be swapped out
/// (tests drive the full pipeline through a fixture decoder).
pub struct Pipeline {
    config: PipelineConfig,
    decoder: Arc<dyn IconDecoder>,
}

impl Pipeline {
    /// Create a pipeline with the given configuration and decoder.
    #[must_use]
    pub fn new(config: PipelineConfig, decoder: Arc<dyn IconDecoder>) -> Self {
        Self { config, decoder }
    }

    /// Run the pipeline over a source tree.
    ///
    /// Walks `source`, processes every candidate in parallel, and returns the
    /// run summary. The walker's traversal errors are skipped (debug-logged);
    /// per-file processing errors are printed and skipped. Only a failure to
    /// build the worker pool aborts the run.
    pub fn run(&self, source: &Path) -> Result<ScanSummary, PipelineError> {
        let start = Instant::now();
        let counters = RunCounters::default();
        let registry = DedupRegistry::new();
        let walker = Walker::new(source, WalkerConfig::new(self.config.extensions.clone()));

        // num_threads(0) lets rayon size the pool to the host CPU count.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.unwrap_or(0))
            .build()?;

        log::debug!(
            "scanning {} with {} workers",
            source.display(),
            pool.current_num_threads()
        );

        pool.install(|| {
            walker
                .walk()
                .par_bridge()
                .for_each(|node| self.handle_node(node, &registry, &counters));
        });

        Ok(ScanSummary {
            files_scanned: counters.scanned.load(Ordering::Relaxed),
            files_with_icons: counters.icon_bearing.load(Ordering::Relaxed),
            icons_saved: counters.saved.load(Ordering::Relaxed),
            elapsed: start.elapsed(),
        })
    }

    /// Per-node entry point: count, process, and absorb failures.
    fn handle_node(
        &self,
        node: Result<PathBuf, ScanError>,
        registry: &DedupRegistry,
        counters: &RunCounters,
    ) {
        let path = match node {
            Ok(path) => path,
            Err(e) => {
                // Unreadable directories are skipped without user-visible output.
                log::debug!("traversal skip: {e}");
                return;
            }
        };

        counters.record_scanned();

        if let Err(e) = self.process_candidate(&path, registry, counters) {
            println!("Error file {}: {}", path.display(), e);
        }
    }

    /// Run one candidate through decode → resize → hash → admit → save.
    fn process_candidate(
        &self,
        path: &Path,
        registry: &DedupRegistry,
        counters: &RunCounters,
    ) -> Result<(), CandidateError> {
        let kind = CandidateKind::from_path(path);

        let Some(icon) = self.decoder.decode(path, kind)? else {
            log::trace!("no icon: {}", path.display());
            return Ok(());
        };
        counters.record_icon_bearing();

        let canonical = sizes::canonicalize(icon);
        let digest = pixel_digest(&canonical);

        if !registry.try_admit(&digest) {
            log::trace!("duplicate icon content: {}", path.display());
            return Ok(());
        }

        let base_name = output::build_base_name(path, canonical.width(), canonical.height());
        let saved = output::save_icon(&canonical, &self.config.output_root, &base_name)?;
        counters.record_saved();
        log::debug!("saved {}", saved.display());

        Ok(())
    }
}

/// Failures caught at the per-file boundary.
#[derive(thiserror::Error, Debug)]
enum CandidateError {
    #[error(transparent)]
    Decode(#[from] crate::decoder::DecodeError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
