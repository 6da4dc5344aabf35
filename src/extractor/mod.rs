//! # Metadata Extractor
//!
//! Walks a parsed [`NmrMLDocument`] and resolves its controlled vocabulary
//! annotations against a shared [`OntologyIndex`], producing one
//! [`MetadataRecord`] per document.
//!
//! Sections are read in a fixed order, which is the field insertion order of
//! the record (and therefore the order of dynamically discovered assay
//! columns):
//!
//! 1. `Sample Name`, from the document base name
//! 2. instrument, manufacturer and instrument software
//! 3. acquisition parameters
//! 4. source files
//! 5. data processing (the `Data Transformation` entry list)
//!
//! Bare accessions are then rewritten into URIs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nmrml2isa::extractor::MetadataExtractor;
//! use nmrml2isa::nmrml::NmrMLDocument;
//! use nmrml2isa::ontology::OntologyIndex;
//!
//! let index = OntologyIndex::from_path("nmrCV.owl")?;
//! let document = NmrMLDocument::open("sample42.nmrML")?;
//! let record = MetadataExtractor::new(&index).extract(&document)?;
//! println!("{}", record.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod acquisition;
mod helpers;
mod instrument;
mod processing;
mod source_file;

#[cfg(test)]
mod tests;

pub use acquisition::ACQUISITION_FIELDS;
pub use processing::DATA_TRANSFORMATION;
pub use source_file::{relative_location, SOURCE_FILE_NAMES};

use crate::metadata::MetadataRecord;
use crate::nmrml::{NmrMLDocument, NmrMLError};
use crate::ontology::OntologyIndex;

/// Extracts ISA metadata from nmrML documents
///
/// The extractor only borrows the index, so one index can serve many
/// extractors running on different threads.
#[derive(Debug, Clone, Copy)]
pub struct MetadataExtractor<'a> {
    index: &'a OntologyIndex,
}

impl<'a> MetadataExtractor<'a> {
    /// Create an extractor over a built ontology index
    pub fn new(index: &'a OntologyIndex) -> Self {
        Self { index }
    }

    /// The ontology index used for term resolution
    pub fn index(&self) -> &'a OntologyIndex {
        self.index
    }

    /// Extract the metadata record of one document
    ///
    /// Fails if the instrument configuration or the acquisition parameter
    /// set is missing, or if a scan counter is not an integer. Every other
    /// absence leaves the corresponding field (or sub-part) empty.
    pub fn extract(&self, document: &NmrMLDocument) -> Result<MetadataRecord, NmrMLError> {
        let mut record = MetadataRecord::new(document.name());

        self.read_instrument(document, &mut record)?;
        self.read_acquisition(document, &mut record)?;
        self.read_source_files(document, &mut record);
        self.read_data_processing(document, &mut record);

        record.urlize_accessions();
        log::debug!("{}: extracted {} fields", document.name(), record.len());
        Ok(record)
    }
}
