//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::mapper::MapperError;

/// Failures of a CLI command, displayed as `CODE: message`
#[derive(Debug, Error)]
pub enum CliError {
    #[error("MAP_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// stdin, stdout or the input file
    #[error("MAP_CLI_IO_ERROR: {0}")]
    Io(String),

    /// Schema loading or checking failed
    #[error("MAP_CLI_SCHEMA_ERROR: {}: {}", .0.code(), .0)]
    Schema(MapperError),

    #[error("MAP_CLI_MAPPING_FAILED: {}: {}", .0.code(), .0)]
    Mapping(MapperError),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "MAP_CLI_CONFIG_ERROR",
            CliError::Io(_) => "MAP_CLI_IO_ERROR",
            CliError::Schema(_) => "MAP_CLI_SCHEMA_ERROR",
            CliError::Mapping(_) => "MAP_CLI_MAPPING_FAILED",
        }
    }

    /// The underlying mapper error, if any
    pub fn mapper_error(&self) -> Option<&MapperError> {
        match self {
            CliError::Schema(e) | CliError::Mapping(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(format!("JSON error: {}", e))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::Config("schema_dir must not be empty".into());
        assert_eq!(
            err.to_string(),
            "MAP_CLI_CONFIG_ERROR: schema_dir must not be empty"
        );
    }

    #[test]
    fn test_mapper_error_code_carried_in_display() {
        let err = CliError::Mapping(MapperError::WrapperNotFound("Bag".into()));
        assert_eq!(err.code(), "MAP_CLI_MAPPING_FAILED");
        assert!(err
            .to_string()
            .starts_with("MAP_CLI_MAPPING_FAILED: MAP_WRAPPER_NOT_FOUND: "));
        assert_eq!(err.mapper_error().map(MapperError::code), Some("MAP_WRAPPER_NOT_FOUND"));
    }

    #[test]
    fn test_io_error_conversion() {
        let err = CliError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.code(), "MAP_CLI_IO_ERROR");
        assert!(err.mapper_error().is_none());
    }
}
