use super::*;
use crate::controlled_vocabulary::{NMR_CV_BASE, OBO_BASE};
use crate::metadata::{Scalar, SAMPLE_NAME};
use crate::ontology::{OntologyIndex, TermCategory};
use std::io::Cursor;

const MINI_CV: &str = include_str!("../../tests/data/nmrCV-mini.owl");
const SAMPLE_42: &str = include_str!("../../tests/data/sample42.nmrML");
const SAMPLE_43: &str = include_str!("../../tests/data/sample43.nmrML");

fn index() -> OntologyIndex {
    OntologyIndex::from_reader(Cursor::new(MINI_CV)).unwrap()
}

fn extract(index: &OntologyIndex, name: &str, xml: &str) -> Result<MetadataRecord, NmrMLError> {
    let document = NmrMLDocument::from_reader(name, Cursor::new(xml)).unwrap();
    MetadataExtractor::new(index).extract(&document)
}

#[test]
fn test_sample_name_and_scan_counters() {
    let index = index();
    let record = extract(&index, "sample42", SAMPLE_42).unwrap();

    assert_eq!(record.fields().next().map(|(k, _)| k), Some(SAMPLE_NAME));
    assert_eq!(record.sample_name().as_deref(), Some("sample42"));
    assert_eq!(record.get("Number of scans").unwrap().value, Some(Scalar::Integer(2)));
    assert_eq!(
        record.get("Number of steady state scans").unwrap().value,
        Some(Scalar::Integer(0))
    );
}

#[test]
fn test_instrument_model_resolution() {
    let index = index();
    let record = extract(&index, "sample42", SAMPLE_42).unwrap();

    let instrument = record.get("Instrument").unwrap();
    assert_eq!(instrument.name.as_deref(), Some("AVANCE III HD 600"));
    assert_eq!(instrument.cv_ref.as_deref(), Some("NMR"));
    assert_eq!(
        instrument.accession.as_deref(),
        Some(format!("{}NMR:1400260", NMR_CV_BASE).as_str())
    );

    // Two levels up from a model is the vendor grouping
    let manufacturer = record.get("Instrument Manufacturer").unwrap();
    assert_eq!(manufacturer.name.as_deref(), Some("Bruker"));
    assert_eq!(
        manufacturer.accession.as_deref(),
        Some(format!("{}NMR:1400258", NMR_CV_BASE).as_str())
    );

    let software = record.get("Instrument software").unwrap();
    assert_eq!(software.name.as_deref(), Some("TOPSPIN"));
    assert_eq!(
        record.get("Instrument software version").unwrap().value,
        Some(Scalar::text("3.2"))
    );
}

#[test]
fn test_generic_instrument_with_unknown_vendor() {
    let index = index();
    let record = extract(&index, "sample43", SAMPLE_43).unwrap();

    assert_eq!(record.get("Instrument").unwrap().name.as_deref(), Some("Varian Inova"));

    // Varian is not a vendor term: label only
    let manufacturer = record.get("Instrument Manufacturer").unwrap();
    assert_eq!(manufacturer.name.as_deref(), Some("Varian"));
    assert!(!manufacturer.has_accession());

    assert_eq!(record.get("Instrument software").unwrap().name.as_deref(), Some("VnmrJ"));
    assert!(!record.contains("Instrument software version"));
}

#[test]
fn test_acquisition_fields_always_present() {
    let index = index();
    let record = extract(&index, "sample43", SAMPLE_43).unwrap();

    for (_, field) in ACQUISITION_FIELDS {
        assert!(record.contains(field), "missing {}", field);
    }
    assert!(record.get("Pulse Width").unwrap().is_empty());
    assert!(record.get("Spinning Rate").unwrap().is_empty());

    let decoupling = record.get("Decoupling Nucleus").unwrap();
    assert_eq!(decoupling.name.as_deref(), Some("carbon-13 atom"));
    assert_eq!(
        decoupling.accession.as_deref(),
        Some(format!("{}CHEBI:36928", OBO_BASE).as_str())
    );
}

#[test]
fn test_acquisition_value_with_unit() {
    let index = index();
    let record = extract(&index, "sample42", SAMPLE_42).unwrap();

    let temperature = record.get("Temperature").unwrap();
    assert_eq!(temperature.value, Some(Scalar::text("298.0")));
    assert!(!temperature.has_accession());
    let unit = temperature.unit.as_ref().unwrap();
    assert_eq!(unit.name.as_deref(), Some("kelvin"));
    assert_eq!(unit.cv_ref.as_deref(), Some("UO"));
    assert_eq!(
        unit.accession.as_deref(),
        Some(format!("{}UO:0000012", OBO_BASE).as_str())
    );

    let pulse = record.get("Pulse sequence name").unwrap();
    assert_eq!(pulse.name.as_deref(), Some("noesygppr1d"));
    assert!(!pulse.is_valued());
}

#[test]
fn test_field_order() {
    let index = index();
    let record = extract(&index, "sample42", SAMPLE_42).unwrap();
    let names: Vec<&str> = record.fields().map(|(k, _)| k).collect();

    let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
    assert!(position("Instrument") < position("Number of scans"));
    assert!(position("Number of scans") < position("Temperature"));
    assert!(position("Sampling Strategy") < position("Free Induction Decay Data File"));
    assert!(position("Free Induction Decay Data File") < position("data transformation software"));
}

#[test]
fn test_source_files() {
    let index = index();
    let record = extract(&index, "sample42", SAMPLE_42).unwrap();

    assert_eq!(
        record.get("Free Induction Decay Data File").unwrap().value,
        Some(Scalar::text("sample42/10/fid"))
    );
    assert_eq!(
        record.get("Processing Parameter Data File").unwrap().value,
        Some(Scalar::text("sample42/10/pdata/1/procs"))
    );
    assert_eq!(
        record.get("Free Induction Decay Data Type").unwrap().name.as_deref(),
        Some("Bruker FID file")
    );
    assert_eq!(
        record.get("Free Induction Decay Data Format").unwrap().name.as_deref(),
        Some("Bruker UXNMR/XWIN-NMR format")
    );
    assert!(record.contains("Pulse Sequence Data Type"));
    assert!(record.contains("Acquisition Parameter Data Type"));
    assert!(record.contains("Processing Parameter Data Type"));
}

#[test]
fn test_spectrum_file_fallback_type() {
    let index = index();
    let record = extract(&index, "sample43", SAMPLE_43).unwrap();

    assert_eq!(
        record.get("1r Data File").unwrap().value,
        Some(Scalar::text("sample43/1/pdata/1/1r"))
    );
    assert_eq!(
        record.get("1r Data Type").unwrap().accession.as_deref(),
        Some(format!("{}NMR:1000319", NMR_CV_BASE).as_str())
    );
}

#[test]
fn test_relative_location() {
    assert_eq!(relative_location("s1", "file:///a/s1/b/s1/fid"), "s1/fid");
    assert_eq!(relative_location("s1", "file:///elsewhere/fid"), "file:///elsewhere/fid");
    assert_eq!(relative_location("", "/x/fid"), "/x/fid");
}

#[test]
fn test_data_transformation_entries() {
    let index = index();
    let record = extract(&index, "sample42", SAMPLE_42).unwrap();

    let entries = record.entries(DATA_TRANSFORMATION);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name.as_deref(), Some("Fourier transformation"));
    assert_eq!(
        entries[1].accession.as_deref(),
        Some(format!("{}NMR:1000044", NMR_CV_BASE).as_str())
    );
    assert_eq!(
        record.get("data transformation software").unwrap().name.as_deref(),
        Some("TOPSPIN")
    );

    let record = extract(&index, "sample43", SAMPLE_43).unwrap();
    assert!(record.entries(DATA_TRANSFORMATION).is_empty());
    assert!(!record.contains("data transformation software"));
}

#[test]
fn test_missing_instrument_configuration_is_fatal() {
    let index = index();
    let xml = SAMPLE_43.replace("instrumentConfigurationList", "otherList");
    let err = extract(&index, "sample43", &xml).unwrap_err();
    assert!(matches!(err, NmrMLError::MissingElement { ref path, .. } if path.contains("instrumentConfiguration")));
}

#[test]
fn test_missing_acquisition_is_fatal() {
    let index = index();
    let xml = SAMPLE_43.replace("acquisition1D", "acquisitionXD");
    let err = extract(&index, "sample43", &xml).unwrap_err();
    assert!(matches!(err, NmrMLError::MissingElement { .. }));
}

#[test]
fn test_non_numeric_scan_count_is_fatal() {
    let index = index();
    let xml = SAMPLE_43.replace("numberOfScans=\"16\"", "numberOfScans=\"many\"");
    let err = extract(&index, "sample43", &xml).unwrap_err();
    assert!(matches!(err, NmrMLError::InvalidAttributeValue { .. }));
}

#[test]
fn test_multi_dimensional_fallback() {
    let index = index();
    let xml = SAMPLE_43.replace("acquisition1D", "acquisitionMultiD");
    let record = extract(&index, "sample43", &xml).unwrap();
    assert_eq!(record.get("Number of scans").unwrap().value, Some(Scalar::Integer(16)));
}

#[test]
fn test_unknown_instrument_is_not_fatal() {
    let index = index();
    let xml = SAMPLE_43.replace("NMR:1400262", "NMR:9999999");
    let record = extract(&index, "sample43", &xml).unwrap();
    assert!(!record.contains("Instrument"));
    assert!(!record.contains("Instrument Manufacturer"));
    assert!(record.contains("Instrument software"));
}

#[test]
fn test_index_shared_across_extractions() {
    let index = index();
    extract(&index, "sample42", SAMPLE_42).unwrap();
    extract(&index, "sample43", SAMPLE_43).unwrap();
    for category in TermCategory::ALL {
        assert_eq!(index.computations(category), 1);
    }
}
