use anyhow::{Context, Result};
use std::path::PathBuf;

use nmrml2isa::extractor::MetadataExtractor;
use nmrml2isa::nmrml::NmrMLDocument;
use nmrml2isa::ontology::{OntologyIndex, OntologySource};

/// Print the metadata extracted from one document
pub fn run(file: PathBuf, ontology: Option<String>, isa: bool) -> Result<()> {
    let source = ontology
        .map(|location| OntologySource::parse(&location))
        .unwrap_or_default();
    let index = OntologyIndex::build(&source)
        .with_context(|| format!("Failed to load ontology from {}", source))?;

    let document = NmrMLDocument::open(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let record = MetadataExtractor::new(&index)
        .extract(&document)
        .with_context(|| format!("Failed to extract metadata from {}", file.display()))?;

    let json = if isa { record.to_isa_json()? } else { record.to_json()? };
    println!("{}", json);

    Ok(())
}
