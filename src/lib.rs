//! # nmrml2isa - nmrML to ISA-Tab Metadata Extraction
//!
//! `nmrml2isa` reads NMR acquisition metadata out of nmrML documents and
//! renders it as an ISA-Tab study description (investigation, study and
//! assay files) suitable for submission to metabolomics repositories.
//!
//! ## Key Features
//!
//! - **Ontology-aware extraction**: Instrument models, vendors and source
//!   file types are resolved against the nmrCV ontology, loaded once per run
//!   and shared immutably across extraction threads.
//!
//! - **Dynamic assay columns**: Acquisition parameters discovered in the
//!   documents become assay columns, with unit and term source columns added
//!   only where the data carries them.
//!
//! - **Template driven output**: ISA-Tab tables are rendered from
//!   tab-separated templates with `{field[key]:spec}` placeholders, which can
//!   be overridden per run.
//!
//! - **User metadata overlay**: Study titles, contacts and characteristics
//!   supplied as JSON fill the parts of the investigation the nmrML files
//!   cannot.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nmrml2isa::extractor::MetadataExtractor;
//! use nmrml2isa::isa::IsaTabWriter;
//! use nmrml2isa::nmrml::NmrMLDocument;
//! use nmrml2isa::ontology::OntologyIndex;
//!
//! // Build the ontology index once
//! let index = OntologyIndex::from_path("nmrCV.owl")?;
//! let extractor = MetadataExtractor::new(&index);
//!
//! // Extract one record per document
//! let document = NmrMLDocument::open("sample42.nmrML")?;
//! let record = extractor.extract(&document)?;
//!
//! // Render and write the study
//! let writer = IsaTabWriter::with_builtin_templates()?;
//! let output = writer.write("isa/", "MTBLS1", &[record])?;
//! println!("Wrote {}", output.assay.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This creates a directory structure:
//! ```text
//! isa/MTBLS1/
//! ├── i_Investigation.txt
//! ├── s_MTBLS1.txt
//! └── a_MTBLS1_metabolite_profiling_NMR_spectroscopy.txt
//! ```
//!
//! ## Architecture
//!
//! - [`ontology`]: nmrCV class graph and categorized lookup tables
//! - [`nmrml`]: nmrML document model
//! - [`extractor`]: Document to [`metadata::MetadataRecord`] extraction
//! - [`metadata`]: Extracted record types
//! - [`isa`]: Template engine and ISA-Tab writer
//! - [`convert`]: Batch orchestration over directories and zip archives
//! - [`controlled_vocabulary`]: nmrCV roots and accession URIs

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod controlled_vocabulary;
pub mod convert;
pub mod extractor;
pub mod isa;
pub mod metadata;
pub mod nmrml;
pub mod ontology;
pub mod xml;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::controlled_vocabulary::{nmr_terms, urlize, NMR_CV_BASE, NMR_CV_URL};
    pub use crate::convert::{
        ConversionConfig, ConversionError, ConversionStats, Converter, DocumentSource,
    };
    pub use crate::extractor::MetadataExtractor;
    pub use crate::isa::{IsaError, IsaOutput, IsaTabWriter, SchemaPolicy, TemplateSet, UserMeta};
    pub use crate::metadata::{FieldValue, MetadataRecord, Scalar, Unit};
    pub use crate::nmrml::{NmrMLDocument, NmrMLError};
    pub use crate::ontology::{OntologyError, OntologyIndex, OntologySource, TermCategory};
}
