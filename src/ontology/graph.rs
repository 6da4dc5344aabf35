use std::collections::HashMap;

/// Index of a term inside a [`TermGraph`]
pub type TermId = usize;

/// A node of the ontology class hierarchy
#[derive(Debug, Clone, Default)]
pub struct TermNode {
    /// Full class IRI
    pub iri: String,
    /// Short accession derived from the IRI (e.g. "NMR:1000031")
    pub accession: String,
    /// Human-readable labels, in declaration order
    pub labels: Vec<String>,
    pub(crate) parents: Vec<TermId>,
    pub(crate) children: Vec<TermId>,
}

impl TermNode {
    /// First declared label, if any
    pub fn label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

/// Parent/child graph of ontology classes, stored as an arena
#[derive(Debug, Clone, Default)]
pub struct TermGraph {
    nodes: Vec<TermNode>,
    by_accession: HashMap<String, TermId>,
}

/// A class as read from the source, before parent references are resolved
#[derive(Debug, Clone, Default)]
pub(crate) struct RawClass {
    pub iri: String,
    pub labels: Vec<String>,
    pub parent_iris: Vec<String>,
}

impl TermGraph {
    /// Build the graph, linking parents by IRI. References to classes that
    /// are not declared (e.g. `owl:Thing`) are dropped. A class declared
    /// more than once has its labels and parents merged.
    pub(crate) fn from_classes(classes: Vec<RawClass>) -> Self {
        let mut graph = TermGraph::default();
        let mut by_iri: HashMap<String, TermId> = HashMap::new();
        let mut pending: Vec<Vec<String>> = Vec::new();

        for class in classes {
            let id = match by_iri.get(&class.iri) {
                Some(&id) => id,
                None => {
                    let id = graph.nodes.len();
                    let accession = crate::controlled_vocabulary::accession_from_iri(&class.iri);
                    graph.nodes.push(TermNode {
                        iri: class.iri.clone(),
                        accession: accession.clone(),
                        ..Default::default()
                    });
                    pending.push(Vec::new());
                    by_iri.insert(class.iri.clone(), id);
                    graph.by_accession.entry(accession).or_insert(id);
                    id
                }
            };
            graph.nodes[id].labels.extend(class.labels);
            pending[id].extend(class.parent_iris);
        }

        for (child, parent_iris) in pending.into_iter().enumerate() {
            for iri in parent_iris {
                if let Some(&parent) = by_iri.get(&iri) {
                    if parent != child && !graph.nodes[child].parents.contains(&parent) {
                        graph.nodes[child].parents.push(parent);
                        graph.nodes[parent].children.push(child);
                    }
                }
            }
        }

        graph
    }

    /// Number of classes in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no classes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id
    pub fn node(&self, id: TermId) -> &TermNode {
        &self.nodes[id]
    }

    /// Node id by accession
    pub fn id_of(&self, accession: &str) -> Option<TermId> {
        self.by_accession.get(accession).copied()
    }

    /// Node by accession
    pub fn get(&self, accession: &str) -> Option<&TermNode> {
        self.id_of(accession).map(|id| &self.nodes[id])
    }

    /// Direct children of a node
    pub fn children(&self, id: TermId) -> &[TermId] {
        &self.nodes[id].children
    }

    /// Direct parents of a node
    pub fn parents(&self, id: TermId) -> &[TermId] {
        &self.nodes[id].parents
    }

    /// Walk `levels` steps up the first-parent chain
    pub fn ancestor(&self, id: TermId, levels: usize) -> Option<TermId> {
        (0..levels).try_fold(id, |current, _| self.parents(current).first().copied())
    }
}
