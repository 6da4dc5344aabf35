use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use super::graph::TermGraph;
use super::owl::read_owl;
use super::OntologyError;
use crate::controlled_vocabulary::NMR_CV_URL;

/// Where to load the ontology from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OntologySource {
    /// A local OWL file
    Path(PathBuf),
    /// An http(s) URL (requires the `remote` feature)
    Url(String),
}

impl OntologySource {
    /// Interpret a user-supplied location: `http://` and `https://` are URLs,
    /// anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            OntologySource::Url(location.to_string())
        } else {
            OntologySource::Path(PathBuf::from(location))
        }
    }

    /// Load and parse the term graph
    pub fn load(&self) -> Result<TermGraph, OntologyError> {
        match self {
            OntologySource::Path(path) => {
                log::info!("Loading ontology from {}", path.display());
                let file = File::open(path)?;
                read_owl(BufReader::new(file))
            }
            OntologySource::Url(url) => fetch(url),
        }
    }
}

impl Default for OntologySource {
    fn default() -> Self {
        OntologySource::Url(NMR_CV_URL.to_string())
    }
}

impl fmt::Display for OntologySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OntologySource::Path(path) => write!(f, "{}", path.display()),
            OntologySource::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(feature = "remote")]
fn fetch(url: &str) -> Result<TermGraph, OntologyError> {
    log::info!("Downloading ontology from {}", url);
    let fetch_error = |reason: String| OntologyError::FetchError {
        url: url.to_string(),
        reason,
    };

    let response = reqwest::blocking::get(url).map_err(|e| fetch_error(e.to_string()))?;
    if !response.status().is_success() {
        return Err(fetch_error(format!("HTTP {}", response.status())));
    }
    let bytes = response.bytes().map_err(|e| fetch_error(e.to_string()))?;
    read_owl(std::io::Cursor::new(bytes))
}

#[cfg(not(feature = "remote"))]
fn fetch(url: &str) -> Result<TermGraph, OntologyError> {
    Err(OntologyError::RemoteUnsupported(url.to_string()))
}
