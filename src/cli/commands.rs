//! CLI command implementations
//!
//! Both commands follow the same start sequence:
//! 1. Load and validate the config file
//! 2. Apply the configured log level
//! 3. Load every schema file into a fresh registry
//! 4. Freeze the registry

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::mapper::{Mapper, ObjectCollection, TypeRegistry};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_document, write_dump, write_response};

/// Parse arguments and run the requested command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    let result = run_command(cli.command);
    if let Err(e) = &result {
        let cause = e.mapper_error().map_or("", |cause| cause.code());
        Logger::error(
            Event::CommandFailed.as_str(),
            &[("code", e.code()), ("cause", cause)],
        );
    }
    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check { config } => check(&config),
        Command::Map {
            config,
            type_name,
            input,
            wrapper,
        } => map(&config, &type_name, input.as_deref(), wrapper.as_deref()),
    }
}

/// Load schemas and verify every nested type reference resolves
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let registry = load_registry(&config)?;

    registry.check().map_err(CliError::Schema)?;

    let types: Vec<_> = registry
        .schemas()
        .iter()
        .map(|schema| schema.type_name.clone())
        .collect();

    write_response(json!({ "types": types }))
}

/// Map one document into `type_name` and print the object dump
pub fn map(
    config_path: &Path,
    type_name: &str,
    input: Option<&Path>,
    wrapper: Option<&str>,
) -> CliResult<()> {
    let config = load_config(config_path)?;
    let registry = load_registry(&config)?;

    let document = read_document(input)?;

    let mut mapper = Mapper::new(registry);
    if let Some(wrapper) = wrapper.or(config.collection_wrapper.as_deref()) {
        mapper = mapper.with_collection_wrapper(wrapper);
    }

    let object = mapper
        .map(type_name, document)
        .map_err(CliError::Mapping)?;

    write_dump(&object)
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);

    Ok(config)
}

/// Build the frozen registry: every schema file plus the stock wrapper
fn load_registry(config: &Config) -> CliResult<Arc<TypeRegistry>> {
    let mut registry = TypeRegistry::with_schema_dir(&config.schema_path());
    registry
        .register_wrapper(ObjectCollection::NAME, ObjectCollection::factory)
        .map_err(CliError::Schema)?;
    registry.load_all().map_err(CliError::Schema)?;

    Ok(registry.into_shared())
}
