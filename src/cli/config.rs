//! TOML configuration file support.
//!
//! Settings that rarely change between runs can live in a config file:
//!
//! ```toml
//! # nmrml2isa.toml
//! [conversion]
//! ontology = "cv/nmrCV.owl"
//! templates = "templates/"
//! jobs = 4
//! parallel = true
//! schema_policy = "union"
//! ```
//!
//! Command line flags take precedence over config values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use nmrml2isa::isa::SchemaPolicy;

/// Root configuration structure for nmrml2isa.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Configuration for the convert command.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionConfig {
    /// nmrCV ontology path or URL.
    pub ontology: Option<String>,

    /// Directory of template overrides.
    pub templates: Option<PathBuf>,

    /// Number of extraction threads.
    pub jobs: Option<usize>,

    /// Extract documents in parallel.
    pub parallel: Option<bool>,

    /// Assay column unification policy.
    pub schema_policy: Option<SchemaPolicy>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
