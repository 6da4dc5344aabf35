//! Parallel extraction on a rayon thread pool

use rayon::prelude::*;

use super::{ConversionError, Converter, DocumentSource};
use crate::extractor::MetadataExtractor;
use crate::metadata::MetadataRecord;

impl Converter {
    /// Extract documents concurrently; results keep the input order and the
    /// first error is returned
    pub(super) fn extract_parallel(
        &self,
        extractor: &MetadataExtractor<'_>,
        sources: &[DocumentSource],
    ) -> Result<Vec<MetadataRecord>, ConversionError> {
        let run = || {
            sources
                .par_iter()
                .map(|source| self.extract_one(extractor, source))
                .collect::<Result<Vec<_>, _>>()
        };

        match self.config.jobs {
            Some(jobs) => {
                log::debug!("Extracting on {} worker threads", jobs);
                rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .map_err(|e| ConversionError::ThreadPoolError(e.to_string()))?
                    .install(run)
            }
            None => run(),
        }
    }
}
