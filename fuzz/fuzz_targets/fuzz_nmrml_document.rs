#![no_main]

use libfuzzer_sys::fuzz_target;
use nmrml2isa::extractor::MetadataExtractor;
use nmrml2isa::nmrml::NmrMLDocument;
use nmrml2isa::ontology::OntologyIndex;
use std::io::Cursor;
use std::sync::OnceLock;

static INDEX: OnceLock<OntologyIndex> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let index = INDEX.get_or_init(|| {
        OntologyIndex::from_reader(Cursor::new(include_str!("../../tests/data/nmrCV-mini.owl")))
            .expect("bundled ontology must load")
    });

    // Parsing and extraction must fail gracefully, never panic
    if let Ok(document) = NmrMLDocument::from_reader("fuzz", Cursor::new(data)) {
        let _ = MetadataExtractor::new(index).extract(&document);
    }
});
