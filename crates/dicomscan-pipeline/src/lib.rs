//! Bounded-concurrency DICOM metadata batch pipeline
//!
//! Walks a directory tree for `.dcm` files, extracts a fixed schema of
//! descriptive tags from each (patient, study, series, instance), and
//! aggregates the per-file results under a concurrency ceiling with
//! per-file fault isolation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dicomscan_pipeline::{BatchScanner, ScanOptions};
//!
//! let scanner = BatchScanner::new(ScanOptions::default());
//! let report = scanner.run("/data/scans")?;
//! println!("{}/{} files extracted", report.succeeded(), report.total_files);
//! # Ok::<(), dicomscan_core::ScanError>(())
//! ```
//!
//! DICOM decoding is delegated to the `dicom-object` crate behind the
//! [`source::DatasetSource`] seam; tests inject fake sources to exercise the
//! failure paths.

pub mod batch;
pub mod extract;
pub mod gate;
pub mod processor;
pub mod source;

pub use batch::{BatchScanner, ProgressFn, ScanOptions};
pub use extract::extract_tags;
pub use gate::{Gate, GatePermit};
pub use processor::process_file;
pub use source::{Dataset, DatasetSource, DicomFileSource, SourceError};
