//! Required-field validation
//!
//! Validation semantics:
//! - Runs once, on the pre-processed raw input, before materialization
//! - Every required key must be present (a present `null` counts)
//! - A `key|type` spec additionally applies the strict type predicate
//! - Fields not listed as required are never checked
//!
//! Validation does not mutate the input.

use serde_json::{Map, Value};

use super::errors::{MapperError, MapperResult};
use super::schema::Schema;
use super::types::{json_type_name, RequiredField};
use crate::observability::{Event, Logger};

/// Checks the required fields of `schema` against raw input.
///
/// # Errors
///
/// - `UnknownTypeChecker` if a spec names an unknown scalar kind
/// - `MissingField` if a required key is absent
/// - `TypeMismatch` if a present value fails its type predicate
pub fn validate_required(schema: &Schema, raw: &Map<String, Value>) -> MapperResult<()> {
    for spec in &schema.required {
        let field = RequiredField::parse(&schema.type_name, spec)?;

        let Some(value) = raw.get(&field.key) else {
            return Err(rejected(MapperError::MissingField {
                type_name: schema.type_name.clone(),
                field: field.key,
            }));
        };

        if let Some(kind) = field.checker {
            if !kind.matches(value) {
                return Err(rejected(MapperError::TypeMismatch {
                    type_name: schema.type_name.clone(),
                    field: field.key,
                    expected: kind.to_string(),
                    actual: json_type_name(value).to_string(),
                }));
            }
        }
    }

    Ok(())
}

fn rejected(err: MapperError) -> MapperError {
    let message = err.to_string();
    Logger::warn(
        Event::ValidationFailed.as_str(),
        &[("code", err.code()), ("message", message.as_str())],
    );
    err
}
