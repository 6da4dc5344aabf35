use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nmrml2isa::isa::SchemaPolicy;

mod config;
mod convert;
mod inspect;

pub use config::Config;

/// nmrml2isa - nmrML to ISA-Tab metadata extractor
#[derive(Parser)]
#[command(name = "nmrml2isa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// How assay columns are unified across documents
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SchemaPolicyArg {
    /// The first document that carries a field decides its columns
    FirstSeen,
    /// A column is emitted when any document carries the sub-part
    Union,
}

impl From<SchemaPolicyArg> for SchemaPolicy {
    fn from(arg: SchemaPolicyArg) -> Self {
        match arg {
            SchemaPolicyArg::FirstSeen => SchemaPolicy::FirstSeen,
            SchemaPolicyArg::Union => SchemaPolicy::Union,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert nmrML files into an ISA-Tab study
    Convert {
        /// Directory of nmrML files, zip archive, or single nmrML file
        #[arg(short, long, value_name = "IN")]
        input: PathBuf,

        /// Output directory; the study is written to <OUT_DIR>/<STUDY>
        #[arg(short, long, value_name = "OUT_DIR")]
        output: PathBuf,

        /// Study identifier (e.g. MTBLS1)
        #[arg(short, long, value_name = "STUDY")]
        study: String,

        /// User metadata: a JSON file or an inline JSON object
        #[arg(short = 'm', long, value_name = "USERMETA")]
        usermeta: Option<String>,

        /// Number of extraction threads
        #[arg(short, long)]
        jobs: Option<usize>,

        /// nmrCV ontology location (path or http(s) URL)
        #[arg(long, value_name = "PATH|URL")]
        ontology: Option<String>,

        /// Directory of template overrides
        #[arg(long, value_name = "DIR")]
        templates: Option<PathBuf>,

        /// Extract documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Assay column unification policy
        #[arg(long, value_enum)]
        schema_policy: Option<SchemaPolicyArg>,

        /// TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the metadata extracted from one nmrML file as JSON
    Inspect {
        /// nmrML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// nmrCV ontology location (path or http(s) URL)
        #[arg(long, value_name = "PATH|URL")]
        ontology: Option<String>,

        /// Key fields by their ISA-Tab column header
        #[arg(long)]
        isa: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            study,
            usermeta,
            jobs,
            ontology,
            templates,
            sequential,
            schema_policy,
            config,
        } => convert::run(convert::ConvertArgs {
            input,
            output,
            study,
            usermeta,
            jobs,
            ontology,
            templates,
            sequential,
            schema_policy: schema_policy.map(SchemaPolicy::from),
            config,
        }),
        Commands::Inspect { file, ontology, isa } => inspect::run(file, ontology, isa),
    }
}
