//! Tag extraction with per-tag fault isolation

use dicomscan_core::{TagDefinition, TagValue};

use crate::source::Dataset;

/// Extract every schema tag from a dataset
///
/// Each tag is read independently: an absent tag records an empty string,
/// and a malformed value is logged and likewise recorded as empty. A fault
/// in one tag never aborts extraction of the rest. The output always holds
/// exactly one entry per schema definition, in schema order.
pub fn extract_tags<D: Dataset>(dataset: &D, schema: &[TagDefinition]) -> Vec<TagValue> {
    schema
        .iter()
        .map(|def| TagValue {
            name: def.name,
            value: extract_one(dataset, def),
        })
        .collect()
}

fn extract_one<D: Dataset>(dataset: &D, def: &TagDefinition) -> String {
    if !dataset.contains(def.group, def.element) {
        return String::new();
    }
    match dataset.value(def.group, def.element) {
        Ok(value) => value.trim().to_string(),
        Err(e) => {
            log::warn!("Failed to read tag {}: {e}", def.name);
            String::new()
        }
    }
}
