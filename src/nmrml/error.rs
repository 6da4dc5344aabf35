/// Errors that can occur while reading an nmrML document
#[derive(Debug, thiserror::Error)]
pub enum NmrMLError {
    /// The document is not well-formed XML
    #[error("XML parsing error in {document}: {source}")]
    XmlError {
        /// Document name
        document: String,
        /// Underlying parse error
        #[source]
        source: crate::xml::XmlTreeError,
    },

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A required element is absent
    #[error("Malformed nmrML {document}: missing required element {path}")]
    MissingElement {
        /// Document name
        document: String,
        /// Element path relative to the nmrML root
        path: String,
    },

    /// A required attribute is absent
    #[error("Malformed nmrML {document}: <{element}> has no {attribute} attribute")]
    MissingAttribute {
        /// Document name
        document: String,
        /// Element local name
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// An attribute value could not be interpreted
    #[error("Malformed nmrML {document}: invalid {attribute}={value:?} on <{element}>")]
    InvalidAttributeValue {
        /// Document name
        document: String,
        /// Element local name
        element: String,
        /// Attribute name
        attribute: String,
        /// Offending value
        value: String,
    },
}
