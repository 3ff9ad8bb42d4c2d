//! The batch scanner: discovery, bounded parallel processing, aggregation
//!
//! One invocation walks the input root, materializes the full file list,
//! then runs the per-file processor over it on a dedicated rayon pool sized
//! to the concurrency ceiling. A counting gate bounds in-flight processing
//! to the same ceiling independently of the pool size. The aggregate and the
//! progress counter are the only cross-worker shared state.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use dicomscan_core::{Result, ScanError, ScanReport};

use crate::gate::Gate;
use crate::processor::process_file;
use crate::source::{DatasetSource, DicomFileSource};

/// File extension matched during discovery
const DICOM_EXTENSION: &str = "dcm";

/// Per-file progress callback: (processed so far, total discovered)
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Tunables for one batch run
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Concurrency ceiling: pool size and gate slots (default: number of
    /// logical CPUs)
    pub concurrency: usize,
    /// Emit a progress log line every this many processed files; 0 disables
    /// interval logging (the final 100% line is always emitted)
    pub progress_every: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get(),
            progress_every: 100,
        }
    }
}

/// Scans a directory tree and extracts metadata from every DICOM file
///
/// Generic over the dataset source so tests can inject fakes; production
/// code uses [`BatchScanner::new`], which reads real files via
/// `dicom-object`.
pub struct BatchScanner<S: DatasetSource = DicomFileSource> {
    source: S,
    options: ScanOptions,
    progress: Option<ProgressFn>,
}

impl BatchScanner<DicomFileSource> {
    /// Scanner with the production file source and default options
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        Self::with_source(DicomFileSource, options)
    }
}

impl Default for BatchScanner<DicomFileSource> {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl<S: DatasetSource> BatchScanner<S> {
    /// Scanner over an injected dataset source
    pub fn with_source(source: S, options: ScanOptions) -> Self {
        Self {
            source,
            options,
            progress: None,
        }
    }

    /// Install a per-file progress callback (e.g. a terminal progress bar)
    ///
    /// Called exactly once per processed file, success or skip, from worker
    /// threads.
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Run the full pipeline over `root`
    ///
    /// Discovery is a single recursive pass matching `*.dcm`
    /// (case-insensitive); the list is fully materialized before processing
    /// begins. Per-file and per-tag faults are recovered locally and only
    /// logged; they never fail the batch.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidRoot` if `root` is missing or not a
    /// directory (checked before any file access), or `ScanError::Pool` if
    /// the worker pool cannot be started.
    pub fn run<P: AsRef<Path>>(&self, root: P) -> Result<ScanReport> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ScanError::InvalidRoot(root.to_path_buf()));
        }

        let files = discover(root);
        let total = files.len();
        log::info!("Found {} DICOM files under {}", total, root.display());

        let ceiling = self.options.concurrency.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(ceiling)
            .build()
            .map_err(|e| ScanError::Pool(e.to_string()))?;

        let gate = Gate::new(ceiling);
        let aggregate = Mutex::new(Vec::with_capacity(total));
        let processed = AtomicUsize::new(0);
        let start = Instant::now();

        pool.install(|| {
            files.par_iter().for_each(|path| {
                // Gate slot held for the whole file, released on drop even
                // if processing panics
                let _permit = gate.acquire();

                let result = process_file(&self.source, path);
                if let Some(result) = result {
                    aggregate
                        .lock()
                        .expect("aggregate lock poisoned")
                        .push(result);
                }

                let done = processed.fetch_add(1, Ordering::SeqCst) + 1;
                if self.options.progress_every > 0 && done % self.options.progress_every == 0 {
                    log::info!("Progress: {}% ({done}/{total})", done * 100 / total);
                }
                if let Some(callback) = &self.progress {
                    callback(done, total);
                }
            });
        });

        let elapsed = start.elapsed();
        let results = aggregate.into_inner().expect("aggregate lock poisoned");

        // Final line regardless of whether the counter landed on the interval
        log::info!("Progress: 100% ({total}/{total})");
        log::info!(
            "Done: {}/{} files succeeded in {:.1}s",
            results.len(),
            total,
            elapsed.as_secs_f64()
        );

        Ok(ScanReport {
            results,
            total_files: total,
            elapsed,
        })
    }
}

/// Recursively collect every `*.dcm` file under `root`
///
/// Unreadable directory entries are logged and skipped; they do not fail
/// discovery.
fn discover(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry during discovery: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DICOM_EXTENSION))
        })
        .collect()
}
