//! CLI argument definitions using clap
//!
//! Commands:
//! - jsonmapper check --config <path>
//! - jsonmapper map --config <path> --type <name> [--input <path>] [--wrapper <name>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jsonmapper - map decoded JSON documents into typed object graphs
#[derive(Parser, Debug)]
#[command(name = "jsonmapper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load all schemas and verify every nested type resolves
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./jsonmapper.json")]
        config: PathBuf,
    },

    /// Map one JSON document and print the resulting object
    Map {
        /// Path to configuration file
        #[arg(long, default_value = "./jsonmapper.json")]
        config: PathBuf,

        /// Fully-qualified type to map the document into
        #[arg(long = "type")]
        type_name: String,

        /// Input document (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Collection wrapper, overriding the configured one
        #[arg(long)]
        wrapper: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
