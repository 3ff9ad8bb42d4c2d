//! Per-file results and the frozen batch aggregate

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::schema::TAG_SCHEMA;

/// One extracted tag value
///
/// Values are already trimmed; an absent or unreadable tag is recorded as an
/// empty string, so every `FileResult` carries the full schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagValue {
    /// Schema output name
    pub name: &'static str,
    /// Trimmed string value, empty when absent or unreadable
    pub value: String,
}

/// Extracted metadata for one successfully opened file
///
/// Immutable once created. `tags` always holds exactly one entry per schema
/// definition, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// Source file path
    pub file_path: PathBuf,
    /// Schema-ordered tag values
    pub tags: Vec<TagValue>,
}

impl FileResult {
    /// Look up a tag value by its schema output name
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_str())
    }

    /// True when the result carries exactly the schema's key set
    #[must_use]
    pub fn matches_schema(&self) -> bool {
        self.tags.len() == TAG_SCHEMA.len()
            && self
                .tags
                .iter()
                .zip(TAG_SCHEMA.iter())
                .all(|(t, d)| t.name == d.name)
    }
}

/// The frozen aggregate of one batch run
///
/// Filled concurrently while the batch runs, then handed out immutable.
/// `results` holds completion order, which is non-deterministic under
/// parallelism; consumers must not rely on it.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Results for every file that opened and parsed
    pub results: Vec<FileResult>,
    /// Total number of files discovered (processed count, success or skip)
    pub total_files: usize,
    /// Wall-clock duration of the processing stage
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ScanReport {
    /// Number of files that produced a result
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    /// Number of files that failed to open or parse
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.total_files - self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_result(path: &str) -> FileResult {
        FileResult {
            file_path: PathBuf::from(path),
            tags: TAG_SCHEMA
                .iter()
                .map(|d| TagValue {
                    name: d.name,
                    value: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_tag_lookup() {
        let mut result = full_result("a.dcm");
        result.tags[0].value = "PAT-1".to_string();
        assert_eq!(result.tag("PatientID"), Some("PAT-1"));
        assert_eq!(result.tag("PatientName"), Some(""));
        assert_eq!(result.tag("NoSuchTag"), None);
    }

    #[test]
    fn test_matches_schema() {
        let mut result = full_result("a.dcm");
        assert!(result.matches_schema());
        result.tags.pop();
        assert!(!result.matches_schema());
    }

    #[test]
    fn test_report_counts() {
        let report = ScanReport {
            results: vec![full_result("a.dcm"), full_result("b.dcm")],
            total_files: 3,
            elapsed: Duration::from_secs(1),
        };
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.skipped(), 1);
    }
}
