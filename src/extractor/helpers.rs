use crate::metadata::{FieldValue, Scalar, Unit};
use crate::nmrml::{paths, NmrMLDocument};
use crate::xml::Element;

/// Controlled term from a `cvParam`-like element (`name`, `cvRef`, `accession`)
pub(super) fn cv_term(e: &Element) -> FieldValue {
    FieldValue {
        name: e.attr("name").map(str::to_string),
        cv_ref: e.attr("cvRef").map(str::to_string),
        accession: e.attr("accession").map(str::to_string),
        ..Default::default()
    }
}

/// Every sub-part an acquisition parameter element carries
///
/// Attribute values are kept as text; the unit is attached when `unitName`
/// is present.
pub(super) fn parameter_value(e: &Element) -> FieldValue {
    let mut field = FieldValue {
        value: e.attr("value").map(Scalar::text),
        name: e.attr("name").map(str::to_string),
        ..Default::default()
    };

    if let Some(unit_name) = e.attr("unitName") {
        field.unit = Some(Unit {
            name: Some(unit_name.to_string()),
            cv_ref: e.attr("unitCvRef").map(str::to_string),
            accession: e.attr("unitAccession").map(str::to_string),
        });
    }

    if let Some(cv_ref) = e.attr("cvRef") {
        field.cv_ref = Some(cv_ref.to_string());
        field.accession = e.attr("accession").map(str::to_string);
    }

    field
}

/// Resolve a software id against the software list and record
/// `<prefix> software` and, if versioned, `<prefix> software version`.
pub(super) fn software_fields(
    document: &NmrMLDocument,
    software_ref: &str,
) -> Option<(FieldValue, Option<FieldValue>)> {
    let software = document
        .find_all(paths::SOFTWARE)
        .into_iter()
        .find(|s| s.attr("id") == Some(software_ref))?;

    let version = software.attr("version").map(FieldValue::valued);
    Some((cv_term(software), version))
}
