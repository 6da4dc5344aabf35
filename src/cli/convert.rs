use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use nmrml2isa::convert::{ConversionConfig, Converter};
use nmrml2isa::isa::{SchemaPolicy, UserMeta};
use nmrml2isa::ontology::OntologySource;

use super::Config;

/// Arguments of the convert command
pub struct ConvertArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub study: String,
    pub usermeta: Option<String>,
    pub jobs: Option<usize>,
    pub ontology: Option<String>,
    pub templates: Option<PathBuf>,
    pub sequential: bool,
    pub schema_policy: Option<SchemaPolicy>,
    pub config: Option<PathBuf>,
}

/// Convert nmrML files into an ISA-Tab study
pub fn run(args: ConvertArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input does not exist: {}", args.input.display());
    }

    let file_config = match &args.config {
        Some(path) => Config::from_file(path)?.conversion,
        None => Default::default(),
    };

    let usermeta = match args.usermeta.as_deref().map(UserMeta::parse) {
        Some(Ok(usermeta)) => usermeta,
        Some(Err(e)) => {
            warn!("Ignoring user metadata that could not be parsed: {}", e);
            UserMeta::default()
        }
        None => UserMeta::default(),
    };

    let defaults = ConversionConfig::default();
    let config = ConversionConfig {
        ontology: args
            .ontology
            .or(file_config.ontology)
            .map(|location| OntologySource::parse(&location))
            .unwrap_or(defaults.ontology),
        templates: args.templates.or(file_config.templates),
        parallel: !args.sequential && file_config.parallel.unwrap_or(defaults.parallel),
        jobs: args.jobs.or(file_config.jobs),
        schema_policy: args
            .schema_policy
            .or(file_config.schema_policy)
            .unwrap_or(defaults.schema_policy),
        usermeta,
        date: None,
    };

    info!("nmrml2isa - nmrML to ISA-Tab");
    info!("============================");
    info!("Input:    {}", args.input.display());
    info!("Output:   {}", args.output.join(&args.study).display());
    info!("Ontology: {}", config.ontology);
    info!("Schema:   {}", config.schema_policy);
    if config.parallel {
        info!("Parallel extraction: enabled");
    }

    let converter = Converter::new(config);
    let stats = converter
        .convert(&args.input, &args.output, &args.study)
        .with_context(|| format!("Conversion of {} failed", args.input.display()))?;

    info!("Conversion complete!");
    info!("  Documents: {}", stats.documents);
    info!("  Dynamic assay columns: {}", stats.dynamic_columns);
    for file in stats.output.files() {
        info!("  Wrote {}", file.display());
    }

    Ok(())
}
