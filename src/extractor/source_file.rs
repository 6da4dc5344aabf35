use super::helpers::cv_term;
use super::MetadataExtractor;
use crate::controlled_vocabulary::nmr_terms;
use crate::metadata::{FieldValue, MetadataRecord};
use crate::nmrml::{paths, NmrMLDocument};
use crate::ontology::TermCategory;

/// Source file `name` attributes and the field prefix each one maps to
pub const SOURCE_FILE_NAMES: [(&str, &str); 5] = [
    ("fid", "Free Induction Decay Data"),
    ("pulseprogram", "Pulse Sequence Data"),
    ("acqus", "Acquisition Parameter Data"),
    ("procs", "Processing Parameter Data"),
    ("1r", "1r Data"),
];

/// Field prefix for a source file name
pub(super) fn source_file_prefix(name: &str) -> Option<&'static str> {
    SOURCE_FILE_NAMES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, prefix)| *prefix)
}

/// Path of a source file relative to the sample: the sample name followed by
/// whatever comes after its last occurrence in `location`.
pub fn relative_location(sample: &str, location: &str) -> String {
    if sample.is_empty() {
        return location.to_string();
    }
    match location.rfind(sample) {
        Some(pos) => format!("{}{}", sample, &location[pos + sample.len()..]),
        None => location.to_string(),
    }
}

impl MetadataExtractor<'_> {
    /// `<prefix> File`, `<prefix> Format` and `<prefix> Type` for every
    /// recognized source file
    pub(super) fn read_source_files(&self, document: &NmrMLDocument, record: &mut MetadataRecord) {
        for source in document.find_all(paths::SOURCE_FILE) {
            let Some(prefix) = source.attr("name").and_then(source_file_prefix) else {
                continue;
            };

            let location = source.attr("location").unwrap_or_default();
            record.insert(
                format!("{} File", prefix),
                FieldValue::valued(relative_location(document.name(), location)),
            );

            for cv in source.children_named("cvParam") {
                let Some(accession) = cv.attr("accession") else {
                    continue;
                };
                if let Some(suffix) = self.classify_source_term(accession) {
                    record.insert(format!("{} {}", prefix, suffix), cv_term(cv));
                }
            }
        }
    }

    /// First matching classifier: a file format, then any data type table,
    /// then the hardcoded spectrum file type.
    fn classify_source_term(&self, accession: &str) -> Option<&'static str> {
        if self.index.contains(TermCategory::FileFormat, accession) {
            return Some("Format");
        }
        let is_type = TermCategory::DATA_TYPES
            .iter()
            .any(|category| self.index.contains(*category, accession))
            || accession == nmr_terms::SOURCE_FILE_TYPE_FALLBACK;
        is_type.then_some("Type")
    }
}
