//! Core types and report serialization for dicomscan
//!
//! This crate holds the pure-data side of the scanner:
//!
//! - the fixed extraction schema ([`schema::TAG_SCHEMA`])
//! - per-file results and the frozen batch aggregate ([`result`])
//! - the error taxonomy ([`error::ScanError`])
//! - XML report serialization ([`report`])
//!
//! The batch engine itself lives in `dicomscan-pipeline`.

pub mod error;
pub mod report;
pub mod result;
pub mod schema;

pub use error::{Result, ScanError};
pub use report::{report_to_string, write_report, write_report_file};
pub use result::{FileResult, ScanReport, TagValue};
pub use schema::{TagDefinition, PIXEL_DATA, TAG_SCHEMA};
