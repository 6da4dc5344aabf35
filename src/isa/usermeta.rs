use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::context::{Lookup, Node};
use super::IsaError;

/// Overlay key holding the study contacts
pub const STUDY_CONTACTS: &str = "study_contacts";
/// Overlay key holding the investigation contacts
pub const INVESTIGATION_CONTACTS: &str = "investigation_contacts";

/// User-supplied metadata layered under record fields during substitution
///
/// ```json
/// {
///   "study": {"title": "Awesome Study", "description": "..."},
///   "study_contacts": [{"first_name": "Ada", "last_name": "Lovelace"}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserMeta {
    value: Value,
}

impl UserMeta {
    /// An overlay from a JSON object
    pub fn from_value(value: Value) -> Result<Self, IsaError> {
        match value {
            Value::Object(_) => Ok(Self { value }),
            Value::Null => Ok(Self::default()),
            other => Err(IsaError::InvalidUserMeta(json_kind(&other).to_string())),
        }
    }

    /// Read an overlay from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IsaError> {
        let text = fs::read_to_string(path)?;
        Self::from_value(serde_json::from_str(&text)?)
    }

    /// Interpret a command line argument: an existing file is read as JSON,
    /// anything else is parsed as inline JSON
    pub fn parse(arg: &str) -> Result<Self, IsaError> {
        if Path::new(arg).is_file() {
            Self::from_path(arg)
        } else {
            Self::from_value(serde_json::from_str(arg)?)
        }
    }

    /// Top-level value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    /// Elements of a contact array (empty when absent or not an array)
    pub fn contacts(&self, key: &str) -> &[Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the overlay has no keys
    pub fn is_empty(&self) -> bool {
        self.value.as_object().map_or(true, Map::is_empty)
    }

    /// The overlay as JSON
    pub fn as_value(&self) -> &Value {
        &self.value
    }
}

impl Lookup for UserMeta {
    fn root(&self, name: &str) -> Option<Node<'_>> {
        self.value.root(name)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
