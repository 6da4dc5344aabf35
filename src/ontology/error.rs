/// Errors that can occur while loading the ontology
#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    /// I/O error reading a local ontology file
    #[error("Failed to read ontology: {0}")]
    IoError(#[from] std::io::Error),

    /// The OWL document could not be parsed
    #[error("Failed to parse ontology: {0}")]
    ParseError(#[from] crate::xml::XmlTreeError),

    /// The ontology could not be downloaded
    #[error("Failed to fetch ontology from {url}: {reason}")]
    FetchError {
        /// Requested location
        url: String,
        /// Transport or HTTP status description
        reason: String,
    },

    /// A remote location was given but the crate was built without the `remote` feature
    #[error("Remote ontology locations require the `remote` feature: {0}")]
    RemoteUnsupported(String),

    /// The document parsed but declares no OWL classes
    #[error("Ontology declares no classes")]
    NoClasses,
}
