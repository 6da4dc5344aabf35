use super::*;
use crate::metadata::Scalar;
use std::fs;
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const MINI_CV: &str = include_str!("../../tests/data/nmrCV-mini.owl");
const SAMPLE_42: &str = include_str!("../../tests/data/sample42.nmrML");
const SAMPLE_43: &str = include_str!("../../tests/data/sample43.nmrML");

fn index() -> OntologyIndex {
    OntologyIndex::from_reader(Cursor::new(MINI_CV)).unwrap()
}

fn memory(name: &str, xml: &str) -> DocumentSource {
    DocumentSource::Memory {
        name: name.to_string(),
        bytes: xml.as_bytes().to_vec(),
    }
}

fn config(parallel: bool) -> ConversionConfig {
    ConversionConfig {
        parallel,
        date: NaiveDate::from_ymd_opt(2024, 1, 2),
        ..Default::default()
    }
}

#[derive(Default, Clone)]
struct CountingProgress {
    finished: Arc<AtomicUsize>,
}

impl ProgressSink for CountingProgress {
    fn document_finished(&self, _name: &str) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_enumerate_directory_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.nmrML"), SAMPLE_43).unwrap();
    fs::write(dir.path().join("a.NMRML"), SAMPLE_42).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let sources = enumerate(dir.path()).unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].sample_name(), "a");
    assert_eq!(sources[1].sample_name(), "b");
}

#[test]
fn test_enumerate_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let result = enumerate(dir.path());
    assert!(matches!(result, Err(ConversionError::NoDocuments(_))));
}

#[test]
fn test_enumerate_zip_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.zip");
    {
        let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("spectra/sample43.nmrML", options).unwrap();
        zip.write_all(SAMPLE_43.as_bytes()).unwrap();
        zip.start_file("spectra/sample42.nmrML", options).unwrap();
        zip.write_all(SAMPLE_42.as_bytes()).unwrap();
        zip.start_file("README", options).unwrap();
        zip.write_all(b"not a document").unwrap();
        zip.finish().unwrap();
    }

    let sources = enumerate(&path).unwrap();
    let names: Vec<String> = sources.iter().map(DocumentSource::sample_name).collect();
    assert_eq!(names, vec!["sample42", "sample43"]);

    let document = sources[0].open().unwrap();
    assert_eq!(document.name(), "sample42");
}

#[test]
fn test_zip_entry_size_header_not_trusted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lying.zip");
    {
        let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zip.start_file("sample42.nmrML", options).unwrap();
        zip.write_all(SAMPLE_42.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    // Declare a ~2 GiB uncompressed size in both the local and central headers
    let mut raw = fs::read(&path).unwrap();
    let huge = 0x7FFF_FFFFu32.to_le_bytes();
    for (signature, offset) in [(b"PK\x03\x04", 22), (b"PK\x01\x02", 24)] {
        let at = raw.windows(4).position(|w| w == signature).unwrap();
        raw[at + offset..at + offset + 4].copy_from_slice(&huge);
    }
    fs::write(&path, &raw).unwrap();

    match enumerate(&path) {
        Ok(sources) => match &sources[0] {
            DocumentSource::Memory { bytes, .. } => assert_eq!(bytes.as_slice(), SAMPLE_42.as_bytes()),
            other => panic!("unexpected source {:?}", other),
        },
        Err(e) => assert!(matches!(e, ConversionError::ArchiveError(_) | ConversionError::IoError(_))),
    }
}

fn tar_bytes() -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, body) in [
        ("batch/sample43.nmrML", SAMPLE_43.as_bytes()),
        ("batch/notes.txt", b"not a document".as_slice()),
        ("batch/sample42.nmrML", SAMPLE_42.as_bytes()),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, body).unwrap();
    }
    builder.into_inner().unwrap()
}

fn assert_tar_sources(path: &std::path::Path) {
    let sources = enumerate(path).unwrap();
    let names: Vec<String> = sources.iter().map(DocumentSource::name).collect();
    assert_eq!(names, vec!["batch/sample42.nmrML", "batch/sample43.nmrML"]);
    assert_eq!(sources[1].open().unwrap().name(), "sample43");
}

#[test]
fn test_enumerate_tar_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.tar");
    fs::write(&path, tar_bytes()).unwrap();
    assert_tar_sources(&path);
}

#[test]
fn test_enumerate_tar_gz_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.tar.gz");
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&tar_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();
    assert_tar_sources(&path);

    let short = dir.path().join("batch.TGZ");
    fs::copy(&path, &short).unwrap();
    assert_tar_sources(&short);
}

#[test]
fn test_enumerate_tar_bz2_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.tar.bz2");
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(&tar_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();
    assert_tar_sources(&path);
}

#[test]
fn test_enumerate_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample42.nmrML");
    fs::write(&path, SAMPLE_42).unwrap();

    let sources = enumerate(&path).unwrap();
    assert_eq!(sources, vec![DocumentSource::File(path)]);
}

#[test]
fn test_extract_all_preserves_order() {
    let index = index();
    let sources = vec![
        memory("sample43.nmrML", SAMPLE_43),
        memory("sample42.nmrML", SAMPLE_42),
        memory("sample44.nmrML", SAMPLE_42),
    ];

    for parallel in [false, true] {
        let converter = Converter::new(config(parallel)).with_progress(NoProgress);
        let records = converter.extract_all(&index, &sources).unwrap();
        let names: Vec<String> = records.iter().filter_map(|r| r.sample_name()).collect();
        assert_eq!(names, vec!["sample43", "sample42", "sample44"]);
    }
}

#[test]
fn test_malformed_document_aborts_batch() {
    let index = index();
    let sources = vec![
        memory("sample42.nmrML", SAMPLE_42),
        memory("broken.nmrML", "<nmrML><acquisition></nmrML>"),
    ];

    for parallel in [false, true] {
        let converter = Converter::new(config(parallel)).with_progress(NoProgress);
        let result = converter.extract_all(&index, &sources);
        assert!(matches!(result, Err(ConversionError::DocumentError(_))));
    }
}

#[test]
fn test_convert_sources_writes_study() {
    let index = index();
    let out = tempfile::tempdir().unwrap();
    let progress = CountingProgress::default();
    let converter = Converter::new(config(true)).with_progress(progress.clone());

    let sources = vec![memory("sample42.nmrML", SAMPLE_42), memory("sample43.nmrML", SAMPLE_43)];
    let stats = converter
        .convert_sources(&index, &sources, out.path(), "MTBLS1")
        .unwrap();

    assert_eq!(stats.documents, 2);
    assert_eq!(progress.finished.load(Ordering::SeqCst), 2);
    assert_eq!(stats.output.directory, out.path().join("MTBLS1"));
    for file in stats.output.files() {
        assert!(file.is_file(), "{}", file.display());
    }

    let assay = fs::read_to_string(&stats.output.assay).unwrap();
    assert_eq!(assay.lines().count(), 3);
    assert!(assay.contains("\"sample42\""));
}

#[test]
fn test_worker_count() {
    let index = index();
    let converter = Converter::new(ConversionConfig {
        jobs: Some(2),
        ..config(true)
    })
    .with_progress(NoProgress);

    let records = converter
        .extract_all(&index, &[memory("sample42.nmrML", SAMPLE_42)])
        .unwrap();
    assert_eq!(records[0].get("Number of scans").unwrap().value, Some(Scalar::Integer(2)));
}

#[test]
fn test_empty_source_list() {
    let converter = Converter::new(config(false)).with_progress(NoProgress);
    let result = converter.extract_all(&index(), &[]);
    assert!(matches!(result, Err(ConversionError::NoDocuments(_))));
}
