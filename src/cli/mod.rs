//! CLI module
//!
//! Provides command-line interface for:
//! - check: load schemas and verify nested type references
//! - map: map one JSON document and print the object dump

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, map, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_document, write_dump, write_response};
