//! Mapper error types
//!
//! Error codes:
//! - MAP_MISSING_FIELD (VALIDATION)
//! - MAP_TYPE_MISMATCH (VALIDATION)
//! - MAP_NOT_AN_OBJECT (VALIDATION)
//! - MAP_UNKNOWN_TYPE_CHECKER (SCHEMA)
//! - MAP_TYPE_NOT_FOUND (SCHEMA)
//! - MAP_WRAPPER_NOT_FOUND (SCHEMA)
//! - MAP_MALFORMED_SCHEMA (SCHEMA)
//! - MAP_DUPLICATE_TYPE (SCHEMA)
//! - MAP_PROPERTY_NOT_FOUND (ACCESS)

use std::fmt;

use thiserror::Error;

/// Error categories. Every failure aborts the operation in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raw input rejected before materialization
    Validation,
    /// Declared schema cannot be applied
    Schema,
    /// Read of a property that is not in the property map
    Access,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "VALIDATION"),
            ErrorKind::Schema => write!(f, "SCHEMA"),
            ErrorKind::Access => write!(f, "ACCESS"),
        }
    }
}

/// Errors raised while registering schemas, constructing or accessing mapped objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapperError {
    #[error("field '{field}' not found in input for {type_name}")]
    MissingField { type_name: String, field: String },

    #[error("field '{field}' is not {expected} in input for {type_name} (got {actual})")]
    TypeMismatch {
        type_name: String,
        field: String,
        expected: String,
        actual: String,
    },

    #[error("input for {type_name} must be an object, got {actual}")]
    NotAnObject { type_name: String, actual: String },

    #[error("type checker '{checker}' not found for {type_name}")]
    UnknownTypeChecker { type_name: String, checker: String },

    #[error("type '{type_ref}' for field '{field}' not found")]
    TypeNotFound { field: String, type_ref: String },

    #[error("collection wrapper '{0}' is not registered")]
    WrapperNotFound(String),

    #[error("malformed schema '{source_name}': {reason}")]
    MalformedSchema { source_name: String, reason: String },

    #[error("type '{0}' is already registered")]
    DuplicateType(String),

    #[error("property '{property}' not found in {type_name}")]
    PropertyNotFound { type_name: String, property: String },
}

impl MapperError {
    pub(crate) fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        MapperError::MalformedSchema {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            MapperError::MissingField { .. } => "MAP_MISSING_FIELD",
            MapperError::TypeMismatch { .. } => "MAP_TYPE_MISMATCH",
            MapperError::NotAnObject { .. } => "MAP_NOT_AN_OBJECT",
            MapperError::UnknownTypeChecker { .. } => "MAP_UNKNOWN_TYPE_CHECKER",
            MapperError::TypeNotFound { .. } => "MAP_TYPE_NOT_FOUND",
            MapperError::WrapperNotFound(_) => "MAP_WRAPPER_NOT_FOUND",
            MapperError::MalformedSchema { .. } => "MAP_MALFORMED_SCHEMA",
            MapperError::DuplicateType(_) => "MAP_DUPLICATE_TYPE",
            MapperError::PropertyNotFound { .. } => "MAP_PROPERTY_NOT_FOUND",
        }
    }

    /// Returns the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapperError::MissingField { .. }
            | MapperError::TypeMismatch { .. }
            | MapperError::NotAnObject { .. } => ErrorKind::Validation,
            MapperError::PropertyNotFound { .. } => ErrorKind::Access,
            _ => ErrorKind::Schema,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_schema(&self) -> bool {
        self.kind() == ErrorKind::Schema
    }

    pub fn is_access(&self) -> bool {
        self.kind() == ErrorKind::Access
    }
}

/// Result type for mapper operations
pub type MapperResult<T> = Result<T, MapperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let missing = MapperError::MissingField {
            type_name: "app::User".into(),
            field: "name".into(),
        };
        assert!(missing.is_validation());

        let unresolved = MapperError::TypeNotFound {
            field: "meta".into(),
            type_ref: "Meta".into(),
        };
        assert!(unresolved.is_schema());

        let access = MapperError::PropertyNotFound {
            type_name: "app::User".into(),
            property: "email".into(),
        };
        assert!(access.is_access());
        assert_eq!(access.kind().to_string(), "ACCESS");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MapperError::WrapperNotFound("X".into()).code(), "MAP_WRAPPER_NOT_FOUND");
        assert_eq!(MapperError::DuplicateType("X".into()).code(), "MAP_DUPLICATE_TYPE");
        assert_eq!(MapperError::malformed("a.json", "bad").code(), "MAP_MALFORMED_SCHEMA");
    }

    #[test]
    fn test_display_mentions_field_and_type() {
        let err = MapperError::TypeMismatch {
            type_name: "app::User".into(),
            field: "age".into(),
            expected: "int".into(),
            actual: "string".into(),
        };
        let display = err.to_string();
        assert!(display.contains("age"));
        assert!(display.contains("int"));
        assert!(display.contains("app::User"));
    }
}
