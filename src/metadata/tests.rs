use super::*;

#[test]
fn test_sample_name_seeded_first() {
    let mut record = MetadataRecord::new("sample42");
    record.insert("Instrument", FieldValue::named("AVANCE III HD 600"));

    let names: Vec<_> = record.fields().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["Sample Name", "Instrument"]);
    assert_eq!(record.sample_name(), Some("sample42".to_string()));
}

#[test]
fn test_shape_predicates() {
    let plain = FieldValue::valued(2i64);
    assert!(plain.is_valued());
    assert!(!plain.has_units());
    assert!(!plain.has_accession());

    let measured = FieldValue::valued("298.0").with_unit(Unit {
        name: Some("kelvin".to_string()),
        cv_ref: Some("UO".to_string()),
        accession: Some("UO:0000012".to_string()),
    });
    assert!(measured.has_units());

    let term = FieldValue::term("tube", "NMRCV", "NMR:1400132");
    assert!(term.has_accession());
    assert!(!term.is_valued());
    assert!(FieldValue::default().is_empty());
}

#[test]
fn test_urlize_record() {
    let mut record = MetadataRecord::new("s");
    record.insert(
        "Temperature",
        FieldValue::valued("298.0").with_unit(Unit {
            name: Some("kelvin".to_string()),
            cv_ref: Some("UO".to_string()),
            accession: Some("UO:0000012".to_string()),
        }),
    );
    record.insert("NMR tube type", FieldValue::term("tube", "NMRCV", "NMR:1400132"));
    record.push_entry("Data Transformation", FieldValue::term("Fourier transformation", "NMRCV", "NMR:1400049"));
    record.urlize_accessions();

    let temperature = record.get("Temperature").unwrap();
    assert_eq!(
        temperature.unit.as_ref().unwrap().accession.as_deref(),
        Some("http://purl.obolibrary.org/obo/UO:0000012")
    );
    assert_eq!(
        record.get("NMR tube type").unwrap().accession.as_deref(),
        Some("http://nmrML.org/nmrCV#NMR:1400132")
    );
    assert_eq!(
        record.entries("Data Transformation")[0].accession.as_deref(),
        Some("http://nmrML.org/nmrCV#NMR:1400049")
    );

    // A second pass changes nothing
    let snapshot = record.clone();
    record.urlize_accessions();
    assert_eq!(record, snapshot);
}

#[test]
fn test_json_layout() {
    let mut record = MetadataRecord::new("sample42");
    record.insert("Number of scans", FieldValue::valued(2i64));
    record.insert("Instrument", FieldValue::term("AVANCE III HD 600", "NMR", "NMR:1400260"));

    let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
    assert_eq!(json["Number of scans"]["value"], 2);
    assert_eq!(json["Instrument"]["ref"], "NMR");
    assert!(json["Number of scans"].get("unit").is_none());

    let restored = MetadataRecord::from_json(&record.to_json().unwrap()).unwrap();
    assert_eq!(restored, record);
}

#[test]
fn test_isa_headers() {
    assert_eq!(isa_header("Sample Name"), "Sample Name");
    assert_eq!(isa_header("Number of scans"), "Number of scans");
    assert_eq!(isa_header("Temperature"), "Parameter Value[Temperature]");

    let mut record = MetadataRecord::new("sample42");
    record.insert("Temperature", FieldValue::valued("298.0"));
    let isa: serde_json::Value = serde_json::from_str(&record.to_isa_json().unwrap()).unwrap();
    assert!(isa.get("Parameter Value[Temperature]").is_some());
    assert!(isa.get("Sample Name").is_some());
}

#[test]
fn test_entries_default_empty() {
    let record = MetadataRecord::new("s");
    assert!(record.entries("Data Transformation").is_empty());
    assert!(!record.has_list("Data Transformation"));
}
