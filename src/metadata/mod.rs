//! # Metadata Records
//!
//! The structured form of what the extractor reads from an nmrML document.
//!
//! A [`MetadataRecord`] is an insertion-ordered map from field name to
//! [`FieldValue`]. A field value is shape-polymorphic: it may carry a plain
//! `value`, a controlled term (`name` + `ref` + `accession`), a `unit`, or a
//! combination of these. The record's JSON form mirrors this layout:
//!
//! ```json
//! {
//!   "Sample Name": { "value": "sample42" },
//!   "Temperature": {
//!     "value": "298.0",
//!     "unit": { "name": "kelvin", "ref": "UO", "accession": "http://purl.obolibrary.org/obo/UO:0000012" }
//!   }
//! }
//! ```

mod error;
mod record;
mod value;

#[cfg(test)]
mod tests;

pub use error::MetadataError;
pub use record::{isa_header, MetadataRecord, SAMPLE_NAME, VERBATIM_FIELDS};
pub use value::{FieldValue, Scalar, Unit};
