use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{FieldValue, MetadataError};

/// Field seeded from the document base name in every record
pub const SAMPLE_NAME: &str = "Sample Name";

/// Field names written verbatim as column headers; everything else becomes
/// `Parameter Value[<name>]`.
pub const VERBATIM_FIELDS: &[&str] = &[
    "Sample Name",
    "data transformation",
    "data transformation software",
    "data transformation software version",
    "term_source",
    "Derived Spectral Data File",
    "Acquisition Parameter Data File",
    "Free Induction Decay Data File",
    "NMR Assay Name",
    "Number of scans",
    "Number of steady state scans",
];

/// ISA-Tab column header for a field name
pub fn isa_header(field: &str) -> String {
    if VERBATIM_FIELDS.contains(&field) {
        field.to_string()
    } else {
        format!("Parameter Value[{}]", field)
    }
}

/// Metadata extracted from one nmrML document.
///
/// Fields keep their insertion order, which drives the order of dynamically
/// discovered assay columns. Entry lists hold variable-length collections
/// (e.g. data processing steps) that expand repeating template groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(flatten)]
    fields: IndexMap<String, FieldValue>,
    #[serde(rename = "entries", default, skip_serializing_if = "IndexMap::is_empty")]
    lists: IndexMap<String, Vec<FieldValue>>,
}

impl MetadataRecord {
    /// Create a record seeded with its sample name
    pub fn new(sample_name: &str) -> Self {
        let mut record = Self::default();
        record.insert(SAMPLE_NAME, FieldValue::valued(sample_name));
        record
    }

    /// The sample name, if seeded
    pub fn sample_name(&self) -> Option<String> {
        self.get(SAMPLE_NAME)?.value.as_ref().map(|v| v.to_string())
    }

    /// Insert or replace a field; a replaced field keeps its original position
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append an entry to a named list
    pub fn push_entry(&mut self, list: impl Into<String>, value: FieldValue) {
        self.lists.entry(list.into()).or_default().push(value);
    }

    /// Entries of a named list (empty if the list is absent)
    pub fn entries(&self, list: &str) -> &[FieldValue] {
        self.lists.get(list).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a named list exists
    pub fn has_list(&self, list: &str) -> bool {
        self.lists.contains_key(list)
    }

    /// Rewrite every bare accession in the record (fields and list entries)
    pub fn urlize_accessions(&mut self) {
        self.fields
            .values_mut()
            .chain(self.lists.values_mut().flatten())
            .for_each(FieldValue::urlize_accessions);
    }

    /// Pretty JSON of the record keyed by field name
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pretty JSON of the fields keyed by their ISA-Tab column header
    pub fn to_isa_json(&self) -> Result<String, MetadataError> {
        let isa: IndexMap<String, &FieldValue> = self
            .fields
            .iter()
            .map(|(k, v)| (isa_header(k), v))
            .collect();
        Ok(serde_json::to_string_pretty(&isa)?)
    }

    /// Deserialize from JSON produced by [`MetadataRecord::to_json`]
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }
}
