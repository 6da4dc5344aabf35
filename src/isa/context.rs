//! Substitution context: the layered namespace placeholders resolve against.
//!
//! Layers are searched in order and the first layer that knows a root name
//! wins, even if the rest of the path is missing there. Record fields come
//! first, then per-line bindings, the user overlay and the run environment.

use serde_json::Value;

use super::format::{FieldPath, Key, Resolve, Resolved};
use crate::metadata::{FieldValue, MetadataRecord, Scalar, Unit};

/// A borrowed value reached while walking a placeholder path
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// A record field
    Field(&'a FieldValue),
    /// A field's unit
    Unit(&'a Unit),
    /// A record entry list
    Entries(&'a [FieldValue]),
    /// A scalar sub-part
    Scalar(&'a Scalar),
    /// A text sub-part
    Text(&'a str),
    /// Part of a JSON document
    Json(&'a Value),
}

impl<'a> Node<'a> {
    fn child(self, key: &Key) -> Resolution<'a> {
        use Resolution::{Found, Stop};
        match (self, key) {
            (_, Key::Entry) => Stop(Resolved::Invalid),
            (Node::Field(field), Key::Name(name)) => match name.as_str() {
                "value" => field.value.as_ref().map_or(Stop(Resolved::Missing), |v| Found(Node::Scalar(v))),
                "name" => text(field.name.as_deref()),
                "ref" => text(field.cv_ref.as_deref()),
                "accession" => text(field.accession.as_deref()),
                "unit" => field.unit.as_ref().map_or(Stop(Resolved::Missing), |u| Found(Node::Unit(u))),
                _ => Stop(Resolved::Missing),
            },
            (Node::Unit(unit), Key::Name(name)) => match name.as_str() {
                "name" => text(unit.name.as_deref()),
                "ref" => text(unit.cv_ref.as_deref()),
                "accession" => text(unit.accession.as_deref()),
                _ => Stop(Resolved::Missing),
            },
            (Node::Entries(entries), Key::Index(i)) => {
                entries.get(*i).map_or(Stop(Resolved::Missing), |e| Found(Node::Field(e)))
            }
            (Node::Json(Value::Object(map)), Key::Name(name)) => {
                map.get(name).map_or(Stop(Resolved::Missing), |v| Found(Node::Json(v)))
            }
            (Node::Json(Value::Array(items)), Key::Index(i)) => {
                items.get(*i).map_or(Stop(Resolved::Missing), |v| Found(Node::Json(v)))
            }
            _ => Stop(Resolved::Invalid),
        }
    }

    fn leaf(self) -> Resolved {
        match self {
            Node::Scalar(v) => Resolved::Value(v.clone()),
            Node::Text(t) => Resolved::Value(Scalar::text(t)),
            Node::Json(value) => match value {
                Value::Null => Resolved::Missing,
                Value::String(s) => Resolved::Value(Scalar::text(s.as_str())),
                Value::Bool(b) => Resolved::Value(Scalar::text(b.to_string())),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => Resolved::Value(Scalar::Integer(i)),
                    None => n.as_f64().map_or(Resolved::Invalid, |f| Resolved::Value(Scalar::Float(f))),
                },
                Value::Array(_) | Value::Object(_) => Resolved::Invalid,
            },
            Node::Field(_) | Node::Unit(_) | Node::Entries(_) => Resolved::Invalid,
        }
    }
}

enum Resolution<'a> {
    Found(Node<'a>),
    Stop(Resolved),
}

fn text(value: Option<&str>) -> Resolution<'_> {
    value.map_or(Resolution::Stop(Resolved::Missing), |t| Resolution::Found(Node::Text(t)))
}

/// A source of root names
pub trait Lookup {
    /// The value bound to a root name, if this layer knows it
    fn root(&self, name: &str) -> Option<Node<'_>>;
}

impl Lookup for MetadataRecord {
    fn root(&self, name: &str) -> Option<Node<'_>> {
        if let Some(field) = self.get(name) {
            return Some(Node::Field(field));
        }
        self.has_list(name).then(|| Node::Entries(self.entries(name)))
    }
}

impl Lookup for Value {
    fn root(&self, name: &str) -> Option<Node<'_>> {
        self.as_object()?.get(name).map(Node::Json)
    }
}

/// A single name bound to a JSON value (e.g. the current contact)
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    name: &'a str,
    value: &'a Value,
}

impl<'a> Binding<'a> {
    /// Bind `value` to `name`
    pub fn new(name: &'a str, value: &'a Value) -> Self {
        Self { name, value }
    }
}

impl Lookup for Binding<'_> {
    fn root(&self, name: &str) -> Option<Node<'_>> {
        (name == self.name).then_some(Node::Json(self.value))
    }
}

/// Ordered stack of lookup layers
#[derive(Default)]
pub struct Context<'a> {
    layers: Vec<&'a dyn Lookup>,
}

impl<'a> Context<'a> {
    /// An empty context, in which every path is missing
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer below the existing ones
    pub fn layer(mut self, lookup: &'a dyn Lookup) -> Self {
        self.layers.push(lookup);
        self
    }
}

impl Resolve for Context<'_> {
    fn resolve(&self, path: &FieldPath) -> Resolved {
        let Some(mut node) = self.layers.iter().find_map(|l| l.root(path.root())) else {
            return Resolved::Missing;
        };
        for key in path.keys() {
            match node.child(key) {
                Resolution::Found(next) => node = next,
                Resolution::Stop(resolved) => return resolved,
            }
        }
        node.leaf()
    }
}
