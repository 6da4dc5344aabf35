use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{NmrMLError, NMRML_NAMESPACE};
use crate::xml::{self, Element};

/// Local name of the nmrML document element
pub const NMRML_ROOT: &str = "nmrML";

/// A parsed nmrML document
#[derive(Debug, Clone)]
pub struct NmrMLDocument {
    name: String,
    root: Element,
}

impl NmrMLDocument {
    /// Open and parse an nmrML file; the sample name is the file stem
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NmrMLError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(&sample_name_of(path), BufReader::with_capacity(64 * 1024, file))
    }

    /// Parse a document from a reader under an explicit sample name
    pub fn from_reader<R: BufRead>(name: &str, reader: R) -> Result<Self, NmrMLError> {
        let root = xml::parse(reader).map_err(|source| NmrMLError::XmlError {
            document: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            root,
        })
    }

    /// Sample name (document base name without extension)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `nmrML` element: the document root itself, a nested `nmrML`
    /// element if the document is wrapped, or the root as a last resort.
    pub fn nmrml(&self) -> &Element {
        if self.root.name() == NMRML_ROOT {
            return &self.root;
        }
        self.root
            .descendant(Some(NMRML_NAMESPACE), NMRML_ROOT)
            .or_else(|| self.root.descendant(None, NMRML_ROOT))
            .unwrap_or(&self.root)
    }

    /// First element at a path below the `nmrML` element
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.nmrml().find(path)
    }

    /// Every element at a path below the `nmrML` element
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        self.nmrml().find_all(path)
    }

    /// First element at a path, or a `MissingElement` error
    pub fn require(&self, path: &str) -> Result<&Element, NmrMLError> {
        self.find(path).ok_or_else(|| NmrMLError::MissingElement {
            document: self.name.clone(),
            path: path.to_string(),
        })
    }

    /// A required integer attribute
    pub fn require_int(&self, element: &Element, attribute: &str) -> Result<i64, NmrMLError> {
        let raw = element
            .attr(attribute)
            .ok_or_else(|| NmrMLError::MissingAttribute {
                document: self.name.clone(),
                element: element.name().to_string(),
                attribute: attribute.to_string(),
            })?;
        raw.trim()
            .parse()
            .map_err(|_| NmrMLError::InvalidAttributeValue {
                document: self.name.clone(),
                element: element.name().to_string(),
                attribute: attribute.to_string(),
                value: raw.to_string(),
            })
    }
}

/// Base file name without its extension
pub fn sample_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
