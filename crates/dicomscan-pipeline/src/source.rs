//! Dataset source seam
//!
//! The pipeline treats DICOM decoding as an external collaborator: something
//! that opens a file into a queryable dataset handle. The production
//! implementation wraps the `dicom-object` crate; tests inject fakes to
//! drive failure paths without real DICOM fixtures.

use std::fmt;
use std::path::Path;

use dicom_object::{open_file, DefaultDicomObject, Tag};

/// Fault raised by a dataset source
///
/// These faults are always recovered locally (file skipped or tag value left
/// empty) and only ever reach logs, so a display string is all the pipeline
/// needs from them.
#[derive(Debug)]
pub enum SourceError {
    /// File could not be read
    Io(std::io::Error),
    /// File or value is not decodable DICOM
    Decode(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// A decoded dataset handle: query tag values, strip bulk payload
pub trait Dataset {
    /// Remove an element if present; used to discard PixelData before
    /// extraction. Returns whether the element existed.
    fn remove(&mut self, group: u16, element: u16) -> bool;

    /// Whether the dataset carries the given tag
    fn contains(&self, group: u16, element: u16) -> bool;

    /// Read a tag value as a string. An absent tag yields an empty string;
    /// a present but malformed value is an error.
    fn value(&self, group: u16, element: u16) -> Result<String, SourceError>;
}

/// Opens files into dataset handles
///
/// `Sync` because one source instance is shared across the worker pool.
pub trait DatasetSource: Sync {
    /// The dataset handle type produced by this source
    type Handle: Dataset;

    /// Open and decode a file
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if the file cannot be read or is not valid
    /// DICOM; the caller recovers by skipping the file.
    fn open(&self, path: &Path) -> Result<Self::Handle, SourceError>;
}

/// Production source backed by `dicom-object`
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomFileSource;

/// In-memory DICOM dataset from `dicom-object`
pub struct DicomDataset {
    obj: DefaultDicomObject,
}

impl DatasetSource for DicomFileSource {
    type Handle = DicomDataset;

    fn open(&self, path: &Path) -> Result<DicomDataset, SourceError> {
        let obj = open_file(path).map_err(|e| SourceError::Decode(e.to_string()))?;
        Ok(DicomDataset { obj })
    }
}

impl Dataset for DicomDataset {
    fn remove(&mut self, group: u16, element: u16) -> bool {
        self.obj.remove_element(Tag(group, element))
    }

    fn contains(&self, group: u16, element: u16) -> bool {
        self.obj.element(Tag(group, element)).is_ok()
    }

    fn value(&self, group: u16, element: u16) -> Result<String, SourceError> {
        match self.obj.element(Tag(group, element)) {
            Ok(elem) => elem
                .to_str()
                .map(|s| s.into_owned())
                .map_err(|e| SourceError::Decode(e.to_string())),
            // Absent tags read as empty, mirroring a get-or-default lookup
            Err(_) => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use dicomscan_core::{PIXEL_DATA, TAG_SCHEMA};

    // The schema addresses tags numerically; pin the numbers against the
    // standard dictionary so a typo cannot silently read the wrong element.
    #[test]
    fn test_schema_tags_match_standard_dictionary() {
        use dicom_dictionary_std::tags;

        let expected = [
            ("PatientID", tags::PATIENT_ID),
            ("PatientName", tags::PATIENT_NAME),
            ("PatientBirthDate", tags::PATIENT_BIRTH_DATE),
            ("StudyInstanceUID", tags::STUDY_INSTANCE_UID),
            ("StudyID", tags::STUDY_ID),
            ("StudyDate", tags::STUDY_DATE),
            ("StudyTime", tags::STUDY_TIME),
            ("StudyDescription", tags::STUDY_DESCRIPTION),
            ("SeriesInstanceUID", tags::SERIES_INSTANCE_UID),
            ("SeriesNumber", tags::SERIES_NUMBER),
            ("Modality", tags::MODALITY),
            ("SeriesDescription", tags::SERIES_DESCRIPTION),
            ("SOPInstanceUID", tags::SOP_INSTANCE_UID),
            ("InstanceNumber", tags::INSTANCE_NUMBER),
            ("SOPClassUID", tags::SOP_CLASS_UID),
        ];

        assert_eq!(TAG_SCHEMA.len(), expected.len());
        for (def, (name, tag)) in TAG_SCHEMA.iter().zip(expected) {
            assert_eq!(def.name, name);
            assert_eq!((def.group, def.element), (tag.group(), tag.element()));
        }

        assert_eq!(
            PIXEL_DATA,
            (tags::PIXEL_DATA.group(), tags::PIXEL_DATA.element())
        );
    }
}
