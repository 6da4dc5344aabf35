use serde::{Deserialize, Serialize};
use std::fmt;

use crate::controlled_vocabulary::urlize;

/// An opaque scalar extracted from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer counter (e.g. number of scans)
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text, as found in the source attribute
    Text(String),
}

impl Scalar {
    /// Text value
    pub fn text(value: impl Into<String>) -> Self {
        Scalar::Text(value.into())
    }

    /// Get the value as i64 if it is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as f64 if it is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            Scalar::Text(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(v) => write!(f, "{}", v),
            Scalar::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// Physical unit attached to a measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit name (e.g. "kelvin")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Term source reference (e.g. "UO")
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub cv_ref: Option<String>,

    /// Unit accession
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
}

/// One metadata field: a plain value, a controlled term, or a measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Plain scalar value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,

    /// Human-readable label of a controlled term
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Term source reference (ontology namespace code)
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub cv_ref: Option<String>,

    /// Term accession
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,

    /// Unit of the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl FieldValue {
    /// A plain value
    pub fn valued(value: impl Into<Scalar>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// A name without ontology reference
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// A controlled vocabulary term
    pub fn term(name: impl Into<String>, cv_ref: impl Into<String>, accession: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            cv_ref: Some(cv_ref.into()),
            accession: Some(accession.into()),
            ..Default::default()
        }
    }

    /// Attach a unit
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Whether a plain value is present
    pub fn is_valued(&self) -> bool {
        self.value.is_some()
    }

    /// Whether a unit is present
    pub fn has_units(&self) -> bool {
        self.unit.is_some()
    }

    /// Whether an ontology accession is present
    pub fn has_accession(&self) -> bool {
        self.accession.is_some()
    }

    /// Whether no sub-part is set
    pub fn is_empty(&self) -> bool {
        self == &FieldValue::default()
    }

    /// Rewrite bare accessions (own and unit) into URIs
    pub fn urlize_accessions(&mut self) {
        if let Some(acc) = self.accession.as_mut() {
            *acc = urlize(acc).into_owned();
        }
        if let Some(acc) = self.unit.as_mut().and_then(|u| u.accession.as_mut()) {
            *acc = urlize(acc).into_owned();
        }
    }
}
