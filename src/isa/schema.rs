use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::format::{FieldPath, Template};
use super::template::Column;
use crate::metadata::{isa_header, FieldValue, MetadataRecord};

/// How a field's shape is decided when records disagree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaPolicy {
    /// The first occurrence of a field fixes its shape; later sub-parts the
    /// first occurrence lacked are not rendered
    #[default]
    FirstSeen,
    /// Shape flags are the union over every occurrence
    Union,
}

impl FromStr for SchemaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-seen" | "first_seen" | "firstseen" => Ok(SchemaPolicy::FirstSeen),
            "union" => Ok(SchemaPolicy::Union),
            other => Err(format!("unknown schema policy: {} (expected first-seen or union)", other)),
        }
    }
}

impl fmt::Display for SchemaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaPolicy::FirstSeen => f.write_str("first-seen"),
            SchemaPolicy::Union => f.write_str("union"),
        }
    }
}

/// Column shape of one metadata field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Record field name
    pub field: String,
    /// ISA-Tab header
    pub display_name: String,
    /// Render `value` (otherwise `name`) in the base column
    pub is_valued: bool,
    /// Emit Unit / Term Source REF / Term Accession Number columns
    pub has_units: bool,
    /// Emit Term Source REF / Term Accession Number columns
    pub has_accession: bool,
}

impl ColumnDescriptor {
    /// Descriptor of a field as it appears in one record
    pub fn from_field(field: &str, value: &FieldValue) -> Self {
        Self {
            field: field.to_string(),
            display_name: isa_header(field),
            is_valued: value.is_valued(),
            has_units: value.has_units(),
            has_accession: value.has_accession(),
        }
    }

    fn merge(&mut self, value: &FieldValue) {
        self.is_valued |= value.is_valued();
        self.has_units |= value.has_units();
        self.has_accession |= value.has_accession();
    }

    /// Assay columns for this field: the base column, then term columns,
    /// then unit columns
    pub fn columns(&self) -> Vec<Column> {
        let path = |keys: &[&str]| {
            let path = keys
                .iter()
                .fold(FieldPath::new(self.field.as_str()), |p, k| p.key(*k));
            Template::placeholder(path)
        };

        let base = if self.is_valued { "value" } else { "name" };
        let mut columns = vec![Column::new(self.display_name.as_str(), path(&[base]))];

        if self.has_accession {
            columns.push(Column::new("Term Source REF", path(&["ref"])));
            columns.push(Column::new("Term Accession Number", path(&["accession"])));
        }
        if self.has_units {
            columns.push(Column::new("Unit", path(&["unit", "name"])));
            columns.push(Column::new("Term Source REF", path(&["unit", "ref"])));
            columns.push(Column::new("Term Accession Number", path(&["unit", "accession"])));
        }
        columns
    }
}

/// Unified column shapes over a batch of records, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    columns: IndexMap<String, ColumnDescriptor>,
}

impl ColumnSchema {
    /// Scan records in order, then fields in insertion order
    pub fn unify(records: &[MetadataRecord], policy: SchemaPolicy) -> Self {
        let mut columns: IndexMap<String, ColumnDescriptor> = IndexMap::new();

        for record in records {
            for (name, value) in record.fields() {
                match columns.get_mut(name) {
                    None => {
                        columns.insert(name.to_string(), ColumnDescriptor::from_field(name, value));
                    }
                    Some(descriptor) if policy == SchemaPolicy::Union => descriptor.merge(value),
                    Some(descriptor) => {
                        let seen = ColumnDescriptor::from_field(name, value);
                        if seen != *descriptor {
                            log::debug!(
                                "Field {:?} changes shape in {:?}; keeping first-seen shape",
                                name,
                                record.sample_name().unwrap_or_default()
                            );
                        }
                    }
                }
            }
        }

        Self { columns }
    }

    /// Descriptor of a field
    pub fn get(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.get(field)
    }

    /// Descriptors in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.values()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no field
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Unify the column shapes of a batch of records
pub fn unify(records: &[MetadataRecord], policy: SchemaPolicy) -> ColumnSchema {
    ColumnSchema::unify(records, policy)
}
