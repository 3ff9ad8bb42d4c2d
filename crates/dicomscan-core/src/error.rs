//! Error types for dicomscan

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Scan and report errors
///
/// Per-file and per-tag faults never appear here: they are recovered at
/// their origin (the file is skipped, or the tag value is left empty) and
/// surface only in logs. Only configuration-level and report-write-level
/// failures propagate.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Input root is missing or not a directory (checked before any file access)
    #[error("Input path does not exist or is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// I/O error (output directory creation, report file write, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Worker pool could not be started
    #[error("Worker pool error: {0}")]
    Pool(String),

    /// Report generation error
    #[error("Report error: {0}")]
    Report(String),
}

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
