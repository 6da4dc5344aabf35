//! # Ontology Index
//!
//! Loads the nmrCV class hierarchy once and precomputes the categorized
//! lookup tables the extractor needs:
//!
//! ```text
//! NMR:1000031 instrument model
//! └── Bruker instrument model          (vendor grouping)
//!     └── Bruker AVANCE                (instrument generic)
//!         └── AVANCE III HD 600        (instrument model)
//!
//! NMR:1400255 vendor
//! └── Bruker                           (vendor, keyed by label)
//! ```
//!
//! All tables are computed eagerly in the constructor, so an
//! [`OntologyIndex`] is immutable once built and can be shared by reference
//! across extraction threads without locking.

mod error;
mod graph;
mod owl;
mod source;


use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

pub use error::OntologyError;
pub use graph::{TermGraph, TermId, TermNode};
pub use owl::read_owl;
pub use source::OntologySource;

use crate::controlled_vocabulary::nmr_terms;

/// Suffix carried by vendor grouping classes ("Bruker instrument model")
pub const VENDOR_LABEL_SUFFIX: &str = " instrument model";

/// The categorized views computed over the ontology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermCategory {
    /// Grandchildren of the instrument root
    InstrumentGeneric,
    /// Children of every instrument generic
    InstrumentModel,
    /// Children of the vendor root, keyed by cleaned label
    Vendor,
    /// Children of the file format root
    FileFormat,
    /// Free induction decay file types
    RawSignal,
    /// Pulse program file types
    PulseProgram,
    /// Acquisition parameter file types
    AcquisitionParameters,
    /// Processing parameter file types
    ProcessingParameters,
}

impl TermCategory {
    /// Every category, in computation order
    pub const ALL: [TermCategory; 8] = [
        TermCategory::InstrumentGeneric,
        TermCategory::InstrumentModel,
        TermCategory::Vendor,
        TermCategory::FileFormat,
        TermCategory::RawSignal,
        TermCategory::PulseProgram,
        TermCategory::AcquisitionParameters,
        TermCategory::ProcessingParameters,
    ];

    /// The four source-file data-type categories
    pub const DATA_TYPES: [TermCategory; 4] = [
        TermCategory::RawSignal,
        TermCategory::PulseProgram,
        TermCategory::AcquisitionParameters,
        TermCategory::ProcessingParameters,
    ];
}

/// Strip the vendor grouping suffix from a label
pub fn clean_vendor_label(label: &str) -> &str {
    let label = label.trim();
    label.strip_suffix(VENDOR_LABEL_SUFFIX).unwrap_or(label).trim()
}

#[derive(Debug, Clone, Default)]
struct TermTable {
    entries: HashMap<String, TermId>,
    computations: usize,
}

/// Immutable, categorized view of the nmrCV ontology
#[derive(Debug, Clone)]
pub struct OntologyIndex {
    graph: TermGraph,
    tables: HashMap<TermCategory, TermTable>,
}

impl OntologyIndex {
    /// Load the ontology from a source and build every lookup table
    pub fn build(source: &OntologySource) -> Result<Self, OntologyError> {
        let graph = source.load()?;
        Ok(Self::from_graph(graph))
    }

    /// Build from a local OWL file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, OntologyError> {
        Self::build(&OntologySource::Path(path.as_ref().to_path_buf()))
    }

    /// Build from an in-memory OWL document
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, OntologyError> {
        Ok(Self::from_graph(read_owl(reader)?))
    }

    /// Build every lookup table over an already parsed graph
    pub fn from_graph(graph: TermGraph) -> Self {
        let mut index = Self {
            graph,
            tables: HashMap::new(),
        };
        for category in TermCategory::ALL {
            let table = index.compute(category);
            log::debug!("{:?}: {} terms", category, table.entries.len());
            index.tables.insert(category, table);
        }
        log::info!("Ontology index ready ({} classes)", index.graph.len());
        index
    }

    fn compute(&self, category: TermCategory) -> TermTable {
        let entries = match category {
            TermCategory::InstrumentGeneric => self.keyed_by_accession(
                self.children_of(nmr_terms::INSTRUMENT_MODEL)
                    .into_iter()
                    .flat_map(|vendor_group| self.graph.children(vendor_group).iter().copied()),
            ),
            TermCategory::InstrumentModel => {
                let generics = &self.tables[&TermCategory::InstrumentGeneric];
                let mut generic_ids: Vec<TermId> = generics.entries.values().copied().collect();
                generic_ids.sort_unstable();
                self.keyed_by_accession(
                    generic_ids
                        .into_iter()
                        .flat_map(|generic| self.graph.children(generic).iter().copied()),
                )
            }
            TermCategory::Vendor => self
                .children_of(nmr_terms::VENDOR)
                .into_iter()
                .filter_map(|id| {
                    let label = self.graph.node(id).label()?;
                    Some((clean_vendor_label(label).to_string(), id))
                })
                .collect(),
            TermCategory::FileFormat => {
                self.keyed_by_accession(self.children_of(nmr_terms::FILE_FORMAT))
            }
            TermCategory::RawSignal => self.root_and_children(nmr_terms::FID_FILE),
            TermCategory::PulseProgram => self.root_and_children(nmr_terms::PULSE_PROGRAM_FILE),
            TermCategory::AcquisitionParameters => {
                self.root_and_children(nmr_terms::ACQUISITION_PARAMETER_FILE)
            }
            TermCategory::ProcessingParameters => {
                self.root_and_children(nmr_terms::PROCESSING_PARAMETER_FILE)
            }
        };

        TermTable {
            entries,
            computations: 1,
        }
    }

    fn children_of(&self, accession: &str) -> Vec<TermId> {
        match self.graph.id_of(accession) {
            Some(root) => self.graph.children(root).to_vec(),
            None => {
                log::warn!("Ontology root {} not found", accession);
                Vec::new()
            }
        }
    }

    fn root_and_children(&self, accession: &str) -> HashMap<String, TermId> {
        let root = self.graph.id_of(accession);
        self.keyed_by_accession(root.into_iter().chain(self.children_of(accession)))
    }

    fn keyed_by_accession(&self, ids: impl IntoIterator<Item = TermId>) -> HashMap<String, TermId> {
        ids.into_iter()
            .map(|id| (self.graph.node(id).accession.clone(), id))
            .collect()
    }

    /// The underlying term graph
    pub fn graph(&self) -> &TermGraph {
        &self.graph
    }

    /// Look up a term in a categorized table. Keys are accessions, except for
    /// [`TermCategory::Vendor`] which is keyed by cleaned label.
    pub fn lookup(&self, category: TermCategory, key: &str) -> Option<TermId> {
        self.tables.get(&category)?.entries.get(key).copied()
    }

    /// Whether a key is present in a categorized table
    pub fn contains(&self, category: TermCategory, key: &str) -> bool {
        self.lookup(category, key).is_some()
    }

    /// Number of entries in a categorized table
    pub fn table_len(&self, category: TermCategory) -> usize {
        self.tables.get(&category).map_or(0, |t| t.entries.len())
    }

    /// How many times a table has been computed over the index lifetime
    pub fn computations(&self, category: TermCategory) -> usize {
        self.tables.get(&category).map_or(0, |t| t.computations)
    }

    /// Node by id
    pub fn node(&self, id: TermId) -> &TermNode {
        self.graph.node(id)
    }

    /// Walk `levels` steps up the first-parent chain
    pub fn ancestor(&self, id: TermId, levels: usize) -> Option<TermId> {
        self.graph.ancestor(id, levels)
    }
}
