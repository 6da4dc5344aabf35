use super::helpers::{cv_term, software_fields};
use super::MetadataExtractor;
use crate::metadata::MetadataRecord;
use crate::nmrml::{paths, NmrMLDocument};

/// Entry list holding one controlled term per data processing step
pub const DATA_TRANSFORMATION: &str = "Data Transformation";

impl MetadataExtractor<'_> {
    /// Processing steps and the software that ran them
    pub(super) fn read_data_processing(&self, document: &NmrMLDocument, record: &mut MetadataRecord) {
        let methods = document.find_all(paths::PROCESSING_METHOD);

        for method in &methods {
            for cv in method.children_named("cvParam") {
                record.push_entry(DATA_TRANSFORMATION, cv_term(cv));
            }
        }

        let software = methods
            .iter()
            .find_map(|m| m.attr("softwareRef"))
            .and_then(|software_ref| software_fields(document, software_ref));
        if let Some((software, version)) = software {
            record.insert("data transformation software", software);
            if let Some(version) = version {
                record.insert("data transformation software version", version);
            }
        }
    }
}
