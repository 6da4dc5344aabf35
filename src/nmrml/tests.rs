use super::*;
use std::io::Cursor;
use std::path::Path;

const WRAPPED: &str = r#"<?xml version="1.0"?>
<envelope xmlns:n="http://nmrml.org/schema">
  <n:nmrML>
    <n:acquisition>
      <n:acquisition1D>
        <n:acquisitionParameterSet numberOfScans="8" numberOfSteadyStateScans="x"/>
      </n:acquisition1D>
    </n:acquisition>
  </n:nmrML>
</envelope>"#;

#[test]
fn test_sample_name_from_path() {
    assert_eq!(sample_name_of(Path::new("/data/run/sample42.nmrML")), "sample42");
    assert_eq!(sample_name_of(Path::new("sample.v2.nmrML")), "sample.v2");
}

#[test]
fn test_nested_root_with_prefix() {
    let doc = NmrMLDocument::from_reader("wrapped", Cursor::new(WRAPPED)).unwrap();
    assert_eq!(doc.nmrml().name(), NMRML_ROOT);
    assert_eq!(doc.nmrml().namespace(), Some(NMRML_NAMESPACE));

    let acquisition = doc.require(paths::ACQUISITION_1D).unwrap();
    assert_eq!(doc.require_int(acquisition, "numberOfScans").unwrap(), 8);
}

#[test]
fn test_invalid_integer_attribute() {
    let doc = NmrMLDocument::from_reader("wrapped", Cursor::new(WRAPPED)).unwrap();
    let acquisition = doc.require(paths::ACQUISITION_1D).unwrap();
    let err = doc.require_int(acquisition, "numberOfSteadyStateScans").unwrap_err();
    assert!(matches!(err, NmrMLError::InvalidAttributeValue { ref value, .. } if value == "x"));

    let err = doc.require_int(acquisition, "missing").unwrap_err();
    assert!(matches!(err, NmrMLError::MissingAttribute { .. }));
}

#[test]
fn test_missing_element() {
    let doc = NmrMLDocument::from_reader("wrapped", Cursor::new(WRAPPED)).unwrap();
    let err = doc.require(paths::INSTRUMENT_CONFIGURATION).unwrap_err();
    assert!(err.to_string().contains("instrumentConfigurationList"));
}

#[test]
fn test_not_xml() {
    let result = NmrMLDocument::from_reader("junk", Cursor::new("<nmrML><unclosed></nmrML>"));
    assert!(matches!(result, Err(NmrMLError::XmlError { .. })));
}

#[test]
fn test_nested_root_ignores_foreign_namespace() {
    let xml = r#"<?xml version="1.0"?>
<envelope xmlns:x="urn:other" xmlns:n="http://nmrml.org/schema">
  <x:nmrML/>
  <n:nmrML>
    <n:acquisition>
      <n:acquisition1D>
        <n:acquisitionParameterSet numberOfScans="4" numberOfSteadyStateScans="0"/>
      </n:acquisition1D>
    </n:acquisition>
  </n:nmrML>
</envelope>"#;
    let doc = NmrMLDocument::from_reader("decoy", Cursor::new(xml)).unwrap();
    assert_eq!(doc.nmrml().namespace(), Some(NMRML_NAMESPACE));
    assert!(doc.find(paths::ACQUISITION_1D).is_some());
}
