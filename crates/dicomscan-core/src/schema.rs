//! The fixed extraction schema
//!
//! A `TagDefinition` names one DICOM attribute by its (group, element) pair
//! and the output name it is reported under. The schema is process-wide,
//! read-only data; its insertion order is preserved in every `FileResult`
//! and in the XML report.

/// One schema entry: a DICOM tag and the name it is reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDefinition {
    /// DICOM tag group (e.g. 0x0010 for patient attributes)
    pub group: u16,
    /// DICOM tag element
    pub element: u16,
    /// Output name used as the map key and XML attribute
    pub name: &'static str,
}

impl TagDefinition {
    const fn new(group: u16, element: u16, name: &'static str) -> Self {
        Self {
            group,
            element,
            name,
        }
    }
}

/// PixelData (7FE0,0010) - stripped from every dataset before extraction
pub const PIXEL_DATA: (u16, u16) = (0x7FE0, 0x0010);

/// The descriptive metadata schema: patient, study, series and instance
/// identifiers, in reporting order
pub const TAG_SCHEMA: [TagDefinition; 15] = [
    TagDefinition::new(0x0010, 0x0020, "PatientID"),
    TagDefinition::new(0x0010, 0x0010, "PatientName"),
    TagDefinition::new(0x0010, 0x0030, "PatientBirthDate"),
    TagDefinition::new(0x0020, 0x000D, "StudyInstanceUID"),
    TagDefinition::new(0x0020, 0x0010, "StudyID"),
    TagDefinition::new(0x0008, 0x0020, "StudyDate"),
    TagDefinition::new(0x0008, 0x0030, "StudyTime"),
    TagDefinition::new(0x0008, 0x1030, "StudyDescription"),
    TagDefinition::new(0x0020, 0x000E, "SeriesInstanceUID"),
    TagDefinition::new(0x0020, 0x0011, "SeriesNumber"),
    TagDefinition::new(0x0008, 0x0060, "Modality"),
    TagDefinition::new(0x0008, 0x103E, "SeriesDescription"),
    TagDefinition::new(0x0008, 0x0018, "SOPInstanceUID"),
    TagDefinition::new(0x0020, 0x0013, "InstanceNumber"),
    TagDefinition::new(0x0008, 0x0016, "SOPClassUID"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_has_fifteen_entries() {
        assert_eq!(TAG_SCHEMA.len(), 15);
    }

    #[test]
    fn test_output_names_are_unique() {
        let names: HashSet<&str> = TAG_SCHEMA.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), TAG_SCHEMA.len());
    }

    #[test]
    fn test_tag_pairs_are_unique() {
        let tags: HashSet<(u16, u16)> = TAG_SCHEMA.iter().map(|d| (d.group, d.element)).collect();
        assert_eq!(tags.len(), TAG_SCHEMA.len());
    }

    #[test]
    fn test_pixel_data_is_not_in_schema() {
        assert!(!TAG_SCHEMA
            .iter()
            .any(|d| (d.group, d.element) == PIXEL_DATA));
    }
}
