//! # nmrCV Controlled Vocabulary
//!
//! Root accessions of the nmrCV ontology that the extractor categorizes terms
//! under, plus the accession-to-URI normalization applied to every extracted
//! record.
//!
//! ## Reference
//! - OWL file: http://nmrml.org/cv/v1.0.rc1/nmrCV.owl
//! - Documentation: https://github.com/nmrML/nmrML

use std::borrow::Cow;

/// Default location of the nmrCV ontology
pub const NMR_CV_URL: &str = "http://nmrml.org/cv/v1.0.rc1/nmrCV.owl";

/// Base URL of nmrCV term IRIs
pub const NMR_CV_BASE: &str = "http://nmrML.org/nmrCV#";

/// Base URL of OBO Foundry term IRIs (UO, CHEBI)
pub const OBO_BASE: &str = "http://purl.obolibrary.org/obo/";

/// Term source reference written alongside nmrCV accessions
pub const NMR_CV_REF: &str = "NMR";

/// nmrCV root accessions used to build the categorized lookup tables
pub mod nmr_terms {
    // =========================================================================
    // Instruments
    // =========================================================================

    /// NMR:1000031 - instrument model
    pub const INSTRUMENT_MODEL: &str = "NMR:1000031";

    /// NMR:1400255 - NMR instrument vendor
    pub const VENDOR: &str = "NMR:1400255";

    // =========================================================================
    // Source files
    // =========================================================================

    /// NMR:1400285 - file format
    pub const FILE_FORMAT: &str = "NMR:1400285";

    /// NMR:1400119 - free induction decay file
    pub const FID_FILE: &str = "NMR:1400119";

    /// NMR:1400122 - pulse program file
    pub const PULSE_PROGRAM_FILE: &str = "NMR:1400122";

    /// NMR:1002006 - acquisition parameter file
    pub const ACQUISITION_PARAMETER_FILE: &str = "NMR:1002006";

    /// NMR:1400123 - processing parameter file
    pub const PROCESSING_PARAMETER_FILE: &str = "NMR:1400123";

    /// NMR:1000319 - source file type not reachable from the data-type roots
    pub const SOURCE_FILE_TYPE_FALLBACK: &str = "NMR:1000319";
}

/// Accession namespace families with a known URI template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// nmrCV terms (`NMR:`)
    NmrCv,
    /// OBO Foundry terms (`UO:`, `CHEBI:`)
    Obo,
}

impl Namespace {
    /// Classify an accession by its prefix
    pub fn of(accession: &str) -> Option<Self> {
        if accession.starts_with("NMR") {
            Some(Namespace::NmrCv)
        } else if accession.starts_with("UO") || accession.starts_with("CHEBI") {
            Some(Namespace::Obo)
        } else {
            None
        }
    }

    /// Base URL prepended to bare accessions of this namespace
    pub fn base_url(self) -> &'static str {
        match self {
            Namespace::NmrCv => NMR_CV_BASE,
            Namespace::Obo => OBO_BASE,
        }
    }
}

/// Turn a bare accession into a dereferenceable URI.
///
/// Accessions that already carry a scheme (`://`) and accessions of unknown
/// namespaces are returned unchanged, so the function is idempotent.
pub fn urlize(accession: &str) -> Cow<'_, str> {
    if accession.contains("://") {
        return Cow::Borrowed(accession);
    }
    match Namespace::of(accession) {
        Some(ns) => Cow::Owned(format!("{}{}", ns.base_url(), accession)),
        None => Cow::Borrowed(accession),
    }
}

/// Derive a `PREFIX:NUMBER` accession from an ontology class IRI.
///
/// `http://nmrML.org/nmrCV#NMR:1000031` gives `NMR:1000031`, and the OBO
/// underscore form `http://purl.obolibrary.org/obo/UO_0000010` gives `UO:0000010`.
pub fn accession_from_iri(iri: &str) -> String {
    let tail = match iri.rfind('#') {
        Some(pos) => &iri[pos + 1..],
        None => iri.rsplit('/').next().unwrap_or(iri),
    };

    if !tail.contains(':') {
        if let Some((prefix, number)) = tail.split_once('_') {
            let looks_like_id = !prefix.is_empty()
                && prefix.chars().all(|c| c.is_ascii_alphabetic())
                && !number.is_empty()
                && number.chars().all(|c| c.is_ascii_digit());
            if looks_like_id {
                return format!("{}:{}", prefix, number);
            }
        }
    }
    tail.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_urlize_known_namespaces() {
        assert_eq!(urlize("NMR:1000031"), "http://nmrML.org/nmrCV#NMR:1000031");
        assert_eq!(urlize("UO:0000010"), "http://purl.obolibrary.org/obo/UO:0000010");
        assert_eq!(urlize("CHEBI:49637"), "http://purl.obolibrary.org/obo/CHEBI:49637");
    }

    #[test]
    fn test_urlize_passthrough() {
        assert_eq!(urlize("MS:1000031"), "MS:1000031");
        assert_eq!(
            urlize("http://nmrML.org/nmrCV#NMR:1000031"),
            "http://nmrML.org/nmrCV#NMR:1000031"
        );
        assert!(matches!(urlize("https://example.org/term"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_accession_from_iri() {
        assert_eq!(accession_from_iri("http://nmrML.org/nmrCV#NMR:1000031"), "NMR:1000031");
        assert_eq!(accession_from_iri("http://nmrML.org/nmrCV#NMR_1000031"), "NMR:1000031");
        assert_eq!(accession_from_iri("http://purl.obolibrary.org/obo/UO_0000010"), "UO:0000010");
        assert_eq!(accession_from_iri("http://example.org/terms/some_term"), "some_term");
    }

    proptest! {
        #[test]
        fn prop_urlize_is_idempotent(acc in "(NMR|UO|CHEBI|MS|OBI)?:?[0-9]{0,7}") {
            let once = urlize(&acc).into_owned();
            let twice = urlize(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_urlize_known_prefix_keeps_accession(
            prefix in "(NMR|UO|CHEBI)",
            number in "[0-9]{7}",
        ) {
            let acc = format!("{}:{}", prefix, number);
            let url = urlize(&acc).into_owned();
            let ns = Namespace::of(&acc).unwrap();
            prop_assert!(url.starts_with(ns.base_url()));
            prop_assert!(url.ends_with(&acc));
        }
    }
}
