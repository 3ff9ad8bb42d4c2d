//! Per-file processing: open, strip bulk payload, extract

use std::path::Path;

use dicomscan_core::{FileResult, PIXEL_DATA, TAG_SCHEMA};

use crate::extract::extract_tags;
use crate::source::{Dataset, DatasetSource};

/// Process one file into a `FileResult`, or `None` if it cannot be opened
///
/// Open failures of any kind (I/O, malformed file, unsupported encoding) are
/// logged with the file path and swallowed; the caller still counts the file
/// as processed. PixelData is removed before extraction so the bulk payload
/// is never decoded or carried around.
pub fn process_file<S: DatasetSource>(source: &S, path: &Path) -> Option<FileResult> {
    let mut dataset = match source.open(path) {
        Ok(ds) => ds,
        Err(e) => {
            log::warn!("Failed to process file {}: {e}", path.display());
            return None;
        }
    };

    dataset.remove(PIXEL_DATA.0, PIXEL_DATA.1);

    Some(FileResult {
        file_path: path.to_path_buf(),
        tags: extract_tags(&dataset, &TAG_SCHEMA),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Dataset, DatasetSource, SourceError};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Fake source: paths listed in `unreadable` fail to open; every other
    /// path opens into a dataset with a PatientID and a PixelData element.
    /// Removed tags are recorded for assertion.
    #[derive(Default)]
    struct FakeSource {
        unreadable: Vec<PathBuf>,
        removed: Arc<Mutex<Vec<(u16, u16)>>>,
    }

    struct FakeDataset {
        removed: Arc<Mutex<Vec<(u16, u16)>>>,
        has_pixel_data: bool,
    }

    impl DatasetSource for FakeSource {
        type Handle = FakeDataset;

        fn open(&self, path: &Path) -> Result<FakeDataset, SourceError> {
            if self.unreadable.iter().any(|p| p == path) {
                return Err(SourceError::Decode("not a DICOM stream".into()));
            }
            Ok(FakeDataset {
                removed: Arc::clone(&self.removed),
                has_pixel_data: true,
            })
        }
    }

    impl Dataset for FakeDataset {
        fn remove(&mut self, group: u16, element: u16) -> bool {
            self.removed.lock().unwrap().push((group, element));
            if (group, element) == PIXEL_DATA && self.has_pixel_data {
                self.has_pixel_data = false;
                return true;
            }
            false
        }

        fn contains(&self, group: u16, element: u16) -> bool {
            (group, element) == (0x0010, 0x0020)
        }

        fn value(&self, group: u16, element: u16) -> Result<String, SourceError> {
            if (group, element) == (0x0010, 0x0020) {
                Ok("PAT-1".to_string())
            } else {
                Ok(String::new())
            }
        }
    }

    #[test]
    fn test_successful_file_yields_full_schema_result() {
        let source = FakeSource::default();
        let result = process_file(&source, Path::new("a.dcm")).expect("file processes");

        assert_eq!(result.file_path, PathBuf::from("a.dcm"));
        assert!(result.matches_schema());
        assert_eq!(result.tag("PatientID"), Some("PAT-1"));
    }

    #[test]
    fn test_pixel_data_is_stripped_before_extraction() {
        let source = FakeSource::default();
        process_file(&source, Path::new("a.dcm")).unwrap();

        let removed = source.removed.lock().unwrap();
        assert_eq!(removed.as_slice(), &[PIXEL_DATA]);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let source = FakeSource {
            unreadable: vec![PathBuf::from("corrupt.dcm")],
            ..FakeSource::default()
        };
        assert!(process_file(&source, Path::new("corrupt.dcm")).is_none());
        assert!(process_file(&source, Path::new("fine.dcm")).is_some());
    }
}
