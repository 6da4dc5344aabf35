use std::path::PathBuf;

use crate::isa::IsaError;
use crate::nmrml::NmrMLError;
use crate::ontology::OntologyError;

/// Errors that can occur during a conversion run
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The ontology could not be loaded
    #[error("Ontology error: {0}")]
    OntologyError(#[from] OntologyError),

    /// A document is malformed; the whole batch is aborted
    #[error("nmrML error: {0}")]
    DocumentError(#[from] NmrMLError),

    /// Rendering or writing ISA-Tab files failed
    #[error("ISA-Tab error: {0}")]
    IsaError(#[from] IsaError),

    /// The input archive could not be read
    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The input location holds no nmrML documents
    #[error("No nmrML documents found in {}", .0.display())]
    NoDocuments(PathBuf),

    /// The worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}
