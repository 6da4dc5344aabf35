//! RDF/XML OWL reader
//!
//! Only the class hierarchy is read: `owl:Class` elements carrying an
//! `rdf:about` IRI, their `rdfs:label` text, and their named
//! `rdfs:subClassOf` parents. Anonymous restrictions are skipped.

use std::io::BufRead;

use super::graph::{RawClass, TermGraph};
use super::OntologyError;
use crate::xml::{self, Element};

const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// Parse an OWL document into a term graph
pub fn read_owl<R: BufRead>(reader: R) -> Result<TermGraph, OntologyError> {
    let root = xml::parse(reader)?;
    let classes = collect_classes(&root);
    if classes.is_empty() {
        return Err(OntologyError::NoClasses);
    }
    log::debug!("Read {} OWL class declarations", classes.len());
    Ok(TermGraph::from_classes(classes))
}

fn collect_classes(root: &Element) -> Vec<RawClass> {
    // Classes live directly under rdf:RDF; a bare owl:Class root is accepted too
    let candidates: Vec<&Element> = if root.is(Some(RDF_NS), "RDF") {
        root.children().iter().collect()
    } else {
        vec![root]
    };

    candidates
        .into_iter()
        .filter(|e| e.is(Some(OWL_NS), "Class") || e.is(Some(RDF_NS), "Description"))
        .filter_map(read_class)
        .collect()
}

fn read_class(element: &Element) -> Option<RawClass> {
    let iri = element.attr("about")?.to_string();
    let mut class = RawClass {
        iri,
        ..Default::default()
    };

    for child in element.children() {
        if child.is(Some(RDFS_NS), "label") {
            let label = child.text().trim();
            if !label.is_empty() {
                class.labels.push(label.to_string());
            }
        } else if child.is(Some(RDFS_NS), "subClassOf") {
            if let Some(parent) = child.attr("resource") {
                class.parent_iris.push(parent.to_string());
            }
        }
    }

    Some(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SMALL_OWL: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Ontology rdf:about="http://nmrML.org/nmrCV"/>
  <owl:Class rdf:about="http://nmrML.org/nmrCV#NMR:0000002">
    <rdfs:label>child</rdfs:label>
    <rdfs:subClassOf rdf:resource="http://nmrML.org/nmrCV#NMR:0000001"/>
    <rdfs:subClassOf>
      <owl:Restriction>
        <owl:onProperty rdf:resource="http://nmrML.org/nmrCV#has_part"/>
        <owl:someValuesFrom rdf:resource="http://nmrML.org/nmrCV#NMR:0000003"/>
      </owl:Restriction>
    </rdfs:subClassOf>
  </owl:Class>
  <owl:Class rdf:about="http://nmrML.org/nmrCV#NMR:0000001">
    <rdfs:label xml:lang="en">parent</rdfs:label>
    <rdfs:subClassOf rdf:resource="http://www.w3.org/2002/07/owl#Thing"/>
  </owl:Class>
  <owl:Class rdf:about="http://nmrML.org/nmrCV#NMR:0000003"/>
</rdf:RDF>"#;

    #[test]
    fn test_forward_references_resolved() {
        let graph = read_owl(Cursor::new(SMALL_OWL)).unwrap();
        assert_eq!(graph.len(), 3);

        let child = graph.id_of("NMR:0000002").unwrap();
        let parent = graph.id_of("NMR:0000001").unwrap();
        assert_eq!(graph.parents(child), &[parent]);
        assert_eq!(graph.children(parent), &[child]);
        assert_eq!(graph.node(parent).label(), Some("parent"));
    }

    #[test]
    fn test_restrictions_and_external_parents_ignored() {
        let graph = read_owl(Cursor::new(SMALL_OWL)).unwrap();
        let parent = graph.id_of("NMR:0000001").unwrap();
        let restricted = graph.id_of("NMR:0000003").unwrap();
        assert!(graph.parents(parent).is_empty());
        assert!(graph.children(restricted).is_empty());
    }

    const ENTITY_OWL: &str = r#"<?xml version="1.0"?>
<!DOCTYPE rdf:RDF [
    <!ENTITY owl "http://www.w3.org/2002/07/owl#" >
    <!ENTITY xsd "http://www.w3.org/2001/XMLSchema#" >
    <!ENTITY nmrCV "http://nmrML.org/nmrCV#" >
]>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="&nmrCV;NMR:0000002">
    <rdfs:label rdf:datatype="&xsd;string">child</rdfs:label>
    <rdfs:subClassOf rdf:resource="&nmrCV;NMR:0000001"/>
  </owl:Class>
  <owl:Class rdf:about="&nmrCV;NMR:0000001">
    <rdfs:subClassOf rdf:resource="&owl;Thing"/>
  </owl:Class>
</rdf:RDF>"#;

    #[test]
    fn test_doctype_entity_iris() {
        let graph = read_owl(Cursor::new(ENTITY_OWL)).unwrap();
        assert_eq!(graph.len(), 2);

        let child = graph.id_of("NMR:0000002").unwrap();
        let parent = graph.id_of("NMR:0000001").unwrap();
        assert_eq!(graph.parents(child), &[parent]);
        assert_eq!(graph.node(child).label(), Some("child"));
    }

    #[test]
    fn test_no_classes() {
        let owl = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#;
        assert!(matches!(read_owl(Cursor::new(owl)), Err(OntologyError::NoClasses)));
    }
}
