//! JSON I/O handling for CLI
//!
//! - Input: one decoded JSON document, from a file or stdin
//! - Output: one JSON status line, or an object dump, via stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};
use crate::mapper::MappedObject;

/// Read one JSON document from `input`, or from stdin when `None`
pub fn read_document(input: Option<&Path>) -> CliResult<Value> {
    let content = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::Io("Empty input".into()));
    }

    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an indented dump of a mapped object to stdout
pub fn write_dump(object: &MappedObject) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{:#?}", object)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_document_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{"name": "John", "age": 24}"#).unwrap();

        let value = read_document(Some(&path)).unwrap();
        assert_eq!(value["age"], 24);
    }

    #[test]
    fn test_read_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, "  \n").unwrap();

        let err = read_document(Some(&path)).unwrap_err();
        assert_eq!(err.code(), "MAP_CLI_IO_ERROR");
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, "{not json").unwrap();

        assert!(read_document(Some(&path)).is_err());
    }
}
