//! # nmrml2isa
//!
//! A command-line tool extracting NMR metadata from nmrML files into ISA-Tab.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a directory (or zip archive) of nmrML files
//! nmrml2isa convert -i spectra/ -o isa/ -s MTBLS1 -m usermeta.json
//!
//! # Inspect what is extracted from one file
//! nmrml2isa inspect spectra/sample42.nmrML --isa
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    dispatch(cli)
}
