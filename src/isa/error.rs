/// Errors that can occur while loading templates or writing ISA-Tab files
#[derive(Debug, thiserror::Error)]
pub enum IsaError {
    /// A template cell is not a valid placeholder string
    #[error("Template syntax error in {template}: {message} at byte {position} of {cell:?}")]
    TemplateSyntax {
        /// Template file name
        template: String,
        /// Offending cell text
        cell: String,
        /// Byte offset of the error within the cell
        position: usize,
        /// What went wrong
        message: String,
    },

    /// A template file does not have the expected layout
    #[error("Invalid template {template}: {message}")]
    TemplateShape {
        /// Template file name
        template: String,
        /// What went wrong
        message: String,
    },

    /// The user metadata overlay is not a JSON object
    #[error("User metadata must be a JSON object, got {0}")]
    InvalidUserMeta(String),

    /// Error reading or writing tab-separated data
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// No records to render
    #[error("No metadata records to write")]
    EmptyBatch,
}
