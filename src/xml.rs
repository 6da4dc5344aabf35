//! Namespace-aware XML element tree built on quick-xml
//!
//! nmrML documents and the nmrCV OWL file are small enough (a few MB at most)
//! to be held in memory, and both need random access: the extractor looks up
//! the software list while reading the instrument configuration, and the
//! ontology needs to resolve `subClassOf` references declared out of order.
//! This module reads the whole document with a [`NsReader`] into a light
//! [`Element`] tree whose element names are resolved against their namespace.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// Errors that can occur while building an element tree
#[derive(Debug, thiserror::Error)]
pub enum XmlTreeError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error reading the document
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed character or entity reference
    #[error("Escape error: {0}")]
    EscapeError(#[from] quick_xml::escape::EscapeError),

    /// Element or attribute name is not valid UTF-8
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// The document contains no root element
    #[error("Document has no root element")]
    EmptyDocument,

    /// An end tag did not match any open element
    #[error("Unbalanced end tag: </{0}>")]
    UnbalancedTag(String),
}

/// An XML element with its resolved namespace, attributes, text and children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Local (unprefixed) element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI the element name resolved to, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Concatenated text content directly under this element
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Look up an attribute by its local name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether this element has the given local name in the given namespace
    pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == namespace
    }

    /// Children with the given local name, in this element's own namespace
    pub fn children_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Element> + 'n
    where
        'a: 'n,
    {
        let namespace = self.namespace.as_deref();
        self.children.iter().filter(move |c| c.is(namespace, name))
    }

    /// First child with the given local name, in this element's own namespace
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }

    /// First element, in document order, reachable through a `/`-separated
    /// path of local names
    pub fn find(&self, path: &str) -> Option<&Element> {
        let steps: Vec<&str> = path.split('/').filter(|step| !step.is_empty()).collect();
        self.find_steps(&steps)
    }

    fn find_steps(&self, steps: &[&str]) -> Option<&Element> {
        match steps.split_first() {
            None => Some(self),
            Some((step, rest)) => self.children_named(step).find_map(|c| c.find_steps(rest)),
        }
    }

    /// Every element reachable through a `/`-separated path of local names
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let mut current = vec![self];
        for step in path.split('/').filter(|step| !step.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|node| node.children_named(step))
                .collect();
        }
        current
    }

    /// Depth-first search for the first descendant (or self) with the given
    /// local name in the given namespace
    pub fn descendant(&self, namespace: Option<&str>, name: &str) -> Option<&Element> {
        if self.is(namespace, name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.descendant(namespace, name))
    }
}

/// Parse an XML file into an element tree
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Element, XmlTreeError> {
    let file = File::open(path.as_ref())?;
    parse(BufReader::with_capacity(64 * 1024, file))
}

/// Parse XML from a buffered reader into an element tree
pub fn parse<R: BufRead>(reader: R) -> Result<Element, XmlTreeError> {
    let mut xml = NsReader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut entities: HashMap<String, String> = HashMap::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let element = open_element(&xml, e, &entities)?;
                stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = open_element(&xml, e, &entities)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(ref e) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlTreeError::UnbalancedTag(String::from_utf8_lossy(e.name().as_ref()).into_owned())
                })?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(ref t) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&t.unescape_with(|name| resolve_entity(&entities, name))?);
                }
            }
            Event::CData(ref c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(c));
                }
            }
            Event::DocType(ref d) => {
                entities.extend(entity_declarations(&String::from_utf8_lossy(d)));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or(XmlTreeError::EmptyDocument)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Internal general entities declared in a DOCTYPE subset
/// (`<!ENTITY nmrCV "http://nmrML.org/nmrCV#">`); parameter entities are skipped
fn entity_declarations(doctype: &str) -> Vec<(String, String)> {
    const DECLARATION: &str = "<!ENTITY";

    let mut entities = Vec::new();
    let mut rest = doctype;
    while let Some(start) = rest.find(DECLARATION) {
        rest = &rest[start + DECLARATION.len()..];
        let declaration = rest.trim_start();
        if declaration.starts_with('%') {
            continue;
        }
        let name_end = declaration
            .find(char::is_whitespace)
            .unwrap_or(declaration.len());
        let (name, after) = declaration.split_at(name_end);
        let after = after.trim_start();
        let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let body = &after[1..];
        if let Some(end) = body.find(quote) {
            entities.push((name.to_string(), body[..end].to_string()));
        }
    }
    entities
}

fn resolve_entity<'e>(entities: &'e HashMap<String, String>, name: &str) -> Option<&'e str> {
    entities
        .get(name)
        .map(String::as_str)
        .or_else(|| resolve_predefined_entity(name))
}

fn open_element<R>(
    xml: &NsReader<R>,
    e: &BytesStart,
    entities: &HashMap<String, String>,
) -> Result<Element, XmlTreeError> {
    let (resolved, local) = xml.resolve_element(e.name());
    let namespace = match resolved {
        ResolveResult::Bound(ns) => Some(std::str::from_utf8(ns.as_ref())?.to_string()),
        _ => None,
    };
    let name = std::str::from_utf8(local.as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| XmlTreeError::XmlError(quick_xml::Error::from(e)))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr
            .decode_and_unescape_value_with(xml.decoder(), |name| resolve_entity(entities, name))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        namespace,
        name,
        attributes,
        ..Default::default()
    })
}
