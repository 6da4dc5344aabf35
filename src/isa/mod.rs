//! # ISA-Tab Rendering
//!
//! Projects a batch of [`MetadataRecord`](crate::metadata::MetadataRecord)s
//! into the three ISA-Tab files of a study:
//!
//! | File | Rows | Columns |
//! |------|------|---------|
//! | `i_Investigation.txt` | one per template line | template |
//! | `s_<study>.txt` | header + one per record | template |
//! | `a_<study>_metabolite_profiling_NMR_spectroscopy.txt` | header + one per record | template + discovered fields |
//!
//! Assay columns are laid out once per batch: entry-list groups in the
//! template are repeated to the first record's list length, then every field
//! of the unified [`ColumnSchema`] that the template does not already cover
//! is inserted after the `Parameter Value[Instrument]` block.
//!
//! Substitution is permissive: a placeholder that does not resolve, or whose
//! format spec does not apply, renders as an empty cell.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nmrml2isa::isa::{IsaTabWriter, UserMeta};
//! # let records: Vec<nmrml2isa::metadata::MetadataRecord> = Vec::new();
//!
//! let usermeta = UserMeta::parse(r#"{"study": {"title": "Awesome Study"}}"#)?;
//! let output = IsaTabWriter::with_builtin_templates()?
//!     .with_usermeta(usermeta)
//!     .write("out", "MTBLS1", &records)?;
//! println!("{}", output.assay.display());
//! # Ok::<(), nmrml2isa::isa::IsaError>(())
//! ```

mod context;
mod error;
mod format;
mod schema;
mod template;
mod usermeta;
mod writer;


pub use context::{Binding, Context, Lookup, Node};
pub use error::IsaError;
pub use format::{
    FieldPath, FormatSpec, Key, Resolve, Resolved, SyntaxError, Template, MAX_PRECISION, MAX_WIDTH,
};
pub use schema::{unify, ColumnDescriptor, ColumnSchema, SchemaPolicy};
pub use template::{
    Column, InvestigationTemplate, TableTemplate, TemplateSet, ASSAY_TEMPLATE, INSERTION_ANCHOR,
    INVESTIGATION_TEMPLATE, STUDY_TEMPLATE,
};
pub use usermeta::{UserMeta, INVESTIGATION_CONTACTS, STUDY_CONTACTS};
pub use writer::{
    assay_file_name, study_file_name, write_rows, IsaOutput, IsaTabWriter, IsaTables, Rows,
    RunEnvironment, INVESTIGATION_FILE,
};
