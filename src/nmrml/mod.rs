//! # nmrML Document Module
//!
//! Reads nmrML, the XML community standard for NMR spectroscopy data, into a
//! namespace-aware element tree that the extractor queries by path.
//!
//! ## nmrML Structure (parts used here)
//!
//! ```text
//! nmrML
//! ├── sourceFileList
//! │   └── sourceFile* (name, location, cvParam*)
//! ├── softwareList
//! │   └── software* (id, name, cvRef, accession, version)
//! ├── instrumentConfigurationList
//! │   └── instrumentConfiguration (cvParam*, softwareRef)
//! ├── dataProcessingList
//! │   └── dataProcessing
//! │       └── processingMethod* (softwareRef, cvParam*)
//! └── acquisition
//!     └── acquisition1D
//!         └── acquisitionParameterSet (numberOfScans, numberOfSteadyStateScans)
//!             ├── sampleContainer, sampleAcquisitionTemperature, ...
//!             └── DirectDimensionParameterSet
//! ```

mod document;
mod error;

#[cfg(test)]
mod tests;

pub use document::{sample_name_of, NmrMLDocument, NMRML_ROOT};
pub use error::NmrMLError;

/// nmrML schema namespace
pub const NMRML_NAMESPACE: &str = "http://nmrml.org/schema";

/// Element paths relative to the `nmrML` element
pub mod paths {
    /// Instrument configuration (required)
    pub const INSTRUMENT_CONFIGURATION: &str =
        "instrumentConfigurationList/instrumentConfiguration";
    /// Software entries
    pub const SOFTWARE: &str = "softwareList/software";
    /// One-dimensional acquisition parameters (required unless multi-dimensional)
    pub const ACQUISITION_1D: &str = "acquisition/acquisition1D/acquisitionParameterSet";
    /// Multi-dimensional acquisition parameters
    pub const ACQUISITION_MULTI_D: &str = "acquisition/acquisitionMultiD/acquisitionParameterSet";
    /// Source files
    pub const SOURCE_FILE: &str = "sourceFileList/sourceFile";
    /// Data processing methods
    pub const PROCESSING_METHOD: &str = "dataProcessingList/dataProcessing/processingMethod";
}
