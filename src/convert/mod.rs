//! # Batch Conversion
//!
//! Drives a whole run: enumerate the input documents, build the ontology
//! index once, extract every document, then unify the column schema and
//! write the three ISA-Tab files.
//!
//! ```rust,no_run
//! use nmrml2isa::convert::{ConversionConfig, Converter};
//!
//! let converter = Converter::new(ConversionConfig::default());
//! let stats = converter.convert("spectra/", "isa/", "MTBLS1")?;
//! println!("{} documents, {} dynamic columns", stats.documents, stats.dynamic_columns);
//! # Ok::<(), nmrml2isa::convert::ConversionError>(())
//! ```
//!
//! A malformed document aborts the batch: no partial output is written.

mod error;
mod inputs;
#[cfg(feature = "parallel")]
mod parallel;
mod progress;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

pub use error::ConversionError;
pub use inputs::{enumerate, DocumentSource, NMRML_EXTENSION};
pub use progress::{LogProgress, NoProgress, ProgressSink};

use crate::extractor::MetadataExtractor;
use crate::isa::{IsaOutput, IsaTabWriter, SchemaPolicy, TemplateSet, UserMeta};
use crate::metadata::MetadataRecord;
use crate::ontology::{OntologyIndex, OntologySource};

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Where to load the nmrCV ontology from
    pub ontology: OntologySource,

    /// Directory of template overrides (bundled templates when `None`)
    pub templates: Option<PathBuf>,

    /// Extract documents in parallel (requires the `parallel` feature)
    pub parallel: bool,

    /// Number of worker threads (`None` uses the rayon default)
    pub jobs: Option<usize>,

    /// How the assay column schema is unified across documents
    pub schema_policy: SchemaPolicy,

    /// User metadata overlay
    pub usermeta: UserMeta,

    /// Fixed run date (today when `None`)
    pub date: Option<NaiveDate>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            ontology: OntologySource::default(),
            templates: None,
            parallel: cfg!(feature = "parallel"),
            jobs: None,
            schema_policy: SchemaPolicy::default(),
            usermeta: UserMeta::default(),
            date: None,
        }
    }
}

/// Statistics from a conversion run
#[derive(Debug, Clone)]
pub struct ConversionStats {
    /// Number of documents extracted
    pub documents: usize,

    /// Number of assay columns inserted from the unified schema
    pub dynamic_columns: usize,

    /// Written files
    pub output: IsaOutput,
}

/// Converts a batch of nmrML documents into one ISA-Tab study
pub struct Converter {
    config: ConversionConfig,
    progress: Box<dyn ProgressSink>,
}

impl Converter {
    /// Create a converter reporting progress through the log
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            progress: Box::new(LogProgress::default()),
        }
    }

    /// Replace the progress sink
    pub fn with_progress(mut self, progress: impl ProgressSink + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// The run configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert every document under `input` into `<out_dir>/<study>/`
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        out_dir: Q,
        study: &str,
    ) -> Result<ConversionStats, ConversionError> {
        let sources = enumerate(input)?;
        let index = OntologyIndex::build(&self.config.ontology)?;
        self.convert_sources(&index, &sources, out_dir, study)
    }

    /// Convert already enumerated documents against a prebuilt index
    pub fn convert_sources<Q: AsRef<Path>>(
        &self,
        index: &OntologyIndex,
        sources: &[DocumentSource],
        out_dir: Q,
        study: &str,
    ) -> Result<ConversionStats, ConversionError> {
        let records = self.extract_all(index, sources)?;

        self.progress.writing();
        let output = self.writer()?.write(out_dir, study, &records)?;
        self.progress.finished();

        Ok(ConversionStats {
            documents: records.len(),
            dynamic_columns: output.dynamic_columns,
            output,
        })
    }

    /// Extract every document, preserving input order
    ///
    /// The first failing document aborts the batch.
    pub fn extract_all(
        &self,
        index: &OntologyIndex,
        sources: &[DocumentSource],
    ) -> Result<Vec<MetadataRecord>, ConversionError> {
        if sources.is_empty() {
            return Err(ConversionError::NoDocuments(PathBuf::new()));
        }
        self.progress.started(sources.len());
        let extractor = MetadataExtractor::new(index);

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return self.extract_parallel(&extractor, sources);
            }
        }

        sources
            .iter()
            .map(|source| self.extract_one(&extractor, source))
            .collect()
    }

    fn extract_one(
        &self,
        extractor: &MetadataExtractor<'_>,
        source: &DocumentSource,
    ) -> Result<MetadataRecord, ConversionError> {
        let document = source.open()?;
        let record = extractor.extract(&document)?;
        self.progress.document_finished(&source.name());
        Ok(record)
    }

    fn writer(&self) -> Result<IsaTabWriter, ConversionError> {
        let templates = match &self.config.templates {
            Some(dir) => TemplateSet::from_dir(dir)?,
            None => TemplateSet::builtin()?,
        };
        let mut writer = IsaTabWriter::new(templates)
            .with_policy(self.config.schema_policy)
            .with_usermeta(self.config.usermeta.clone());
        if let Some(date) = self.config.date {
            writer = writer.with_date(date);
        }
        Ok(writer)
    }
}
