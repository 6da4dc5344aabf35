use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nmrml2isa::convert::{ConversionConfig, Converter, DocumentSource, NoProgress};
use nmrml2isa::extractor::MetadataExtractor;
use nmrml2isa::isa::IsaTabWriter;
use nmrml2isa::metadata::MetadataRecord;
use nmrml2isa::nmrml::NmrMLDocument;
use nmrml2isa::ontology::OntologyIndex;
use std::io::Cursor;
use tempfile::TempDir;

const MINI_CV: &str = include_str!("../tests/data/nmrCV-mini.owl");
const SAMPLE_42: &str = include_str!("../tests/data/sample42.nmrML");

fn index() -> OntologyIndex {
    OntologyIndex::from_reader(Cursor::new(MINI_CV)).expect("Ontology failed to load")
}

fn records(index: &OntologyIndex, count: usize) -> Vec<MetadataRecord> {
    let extractor = MetadataExtractor::new(index);
    (0..count)
        .map(|i| {
            let document = NmrMLDocument::from_reader(&format!("sample{}", i), Cursor::new(SAMPLE_42))
                .expect("Document failed to parse");
            extractor.extract(&document).expect("Extraction failed")
        })
        .collect()
}

/// Benchmark parsing plus extraction of a single document
fn bench_extraction(c: &mut Criterion) {
    let index = index();
    let extractor = MetadataExtractor::new(&index);
    let mut group = c.benchmark_group("extraction");
    group.throughput(Throughput::Bytes(SAMPLE_42.len() as u64));

    group.bench_function("parse_and_extract", |b| {
        b.iter(|| {
            let document = NmrMLDocument::from_reader("sample42", Cursor::new(SAMPLE_42))
                .expect("Document failed to parse");
            extractor.extract(&document).expect("Extraction failed")
        });
    });

    group.finish();
}

/// Benchmark in-memory rendering of growing batches
fn bench_rendering(c: &mut Criterion) {
    let index = index();
    let writer = IsaTabWriter::with_builtin_templates().expect("Templates failed to load");
    let mut group = c.benchmark_group("rendering");

    for count in [10, 100, 1000] {
        let batch = records(&index, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &batch, |b, batch| {
            b.iter(|| writer.render("MTBLS1", batch).expect("Rendering failed"));
        });
    }

    group.finish();
}

/// Benchmark a full batch conversion to disk
fn bench_conversion(c: &mut Criterion) {
    let index = index();
    let mut group = c.benchmark_group("conversion");

    for count in [10, 100] {
        let sources: Vec<DocumentSource> = (0..count)
            .map(|i| DocumentSource::Memory {
                name: format!("sample{}.nmrML", i),
                bytes: SAMPLE_42.as_bytes().to_vec(),
            })
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &sources, |b, sources| {
            b.iter_batched(
                || TempDir::new().unwrap(),
                |temp_dir| {
                    let converter = Converter::new(ConversionConfig::default()).with_progress(NoProgress);
                    converter
                        .convert_sources(&index, sources, temp_dir.path(), "MTBLS1")
                        .expect("Conversion failed");
                    drop(temp_dir);
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_rendering, bench_conversion);
criterion_main!(benches);
