//! Scalar kinds and type descriptors
//!
//! Declared types (per property):
//! - string, int, float, bool, array: scalar kinds
//! - any other name: a nested mapped type
//! - a trailing `[]` marks a list of the base type

use serde_json::Value;
use std::fmt;

use super::errors::{MapperError, MapperResult};

/// Suffix marking a repeated (list) type descriptor
const REPEATED_SUFFIX: &str = "[]";

/// Separator between a required field name and its type checker
const CHECKER_SEPARATOR: char = '|';

/// The five scalar kinds a property can be coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Float,
    Bool,
    /// Generic list or map
    Array,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 5] = [
        ScalarKind::String,
        ScalarKind::Int,
        ScalarKind::Float,
        ScalarKind::Bool,
        ScalarKind::Array,
    ];

    /// Looks up a scalar kind by its declared name. Case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
            ScalarKind::Array => "array",
        }
    }

    /// Strict type predicate over decoded input.
    ///
    /// Unlike coercion this never converts: `"24"` is not an `int`.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ScalarKind::String => value.is_string(),
            ScalarKind::Int => value.is_i64() || value.is_u64(),
            ScalarKind::Float => value.is_f64(),
            ScalarKind::Bool => value.is_boolean(),
            ScalarKind::Array => value.is_array() || value.is_object(),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base of a parsed type descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    Scalar(ScalarKind),
    /// Nested mapped type, as declared (bare or qualified)
    Nested(String),
}

/// Parsed form of a declared type string such as `"int"`, `"User"` or `"User[]"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub base: BaseType,
    pub repeated: bool,
}

impl TypeDescriptor {
    pub fn parse(declared: &str) -> Self {
        let (name, repeated) = match declared.strip_suffix(REPEATED_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (declared, false),
        };

        let base = match ScalarKind::parse(name) {
            Some(kind) => BaseType::Scalar(kind),
            None => BaseType::Nested(name.to_string()),
        };

        Self { base, repeated }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.base, BaseType::Scalar(_))
    }

    /// Returns the nested type reference, if this is not a scalar
    pub fn nested_type(&self) -> Option<&str> {
        match &self.base {
            BaseType::Nested(name) => Some(name),
            BaseType::Scalar(_) => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            BaseType::Scalar(kind) => write!(f, "{}", kind)?,
            BaseType::Nested(name) => write!(f, "{}", name)?,
        }
        if self.repeated {
            f.write_str(REPEATED_SUFFIX)?;
        }
        Ok(())
    }
}

/// A required field spec: a bare source key, or `key|type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredField {
    pub key: String,
    pub checker: Option<ScalarKind>,
}

impl RequiredField {
    /// Parses a field spec, splitting on the first `|`.
    ///
    /// # Errors
    ///
    /// `UnknownTypeChecker` when the checker does not name a scalar kind.
    pub fn parse(type_name: &str, spec: &str) -> MapperResult<Self> {
        match spec.split_once(CHECKER_SEPARATOR) {
            None => Ok(Self {
                key: spec.to_string(),
                checker: None,
            }),
            Some((key, checker)) => {
                let kind = ScalarKind::parse(checker).ok_or_else(|| {
                    MapperError::UnknownTypeChecker {
                        type_name: type_name.to_string(),
                        checker: checker.to_string(),
                    }
                })?;
                Ok(Self {
                    key: key.to_string(),
                    checker: Some(kind),
                })
            }
        }
    }
}

/// Returns the JSON type name of a value for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_scalar() {
        let desc = TypeDescriptor::parse("int");
        assert_eq!(desc.base, BaseType::Scalar(ScalarKind::Int));
        assert!(!desc.repeated);
    }

    #[test]
    fn test_parse_repeated_nested() {
        let desc = TypeDescriptor::parse("User[]");
        assert_eq!(desc.nested_type(), Some("User"));
        assert!(desc.repeated);
        assert_eq!(desc.to_string(), "User[]");
    }

    #[test]
    fn test_scalar_names_parse_back() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_scalar_lookup_is_case_sensitive() {
        let desc = TypeDescriptor::parse("Int");
        assert_eq!(desc.nested_type(), Some("Int"));
        assert!(ScalarKind::parse("STRING").is_none());
    }

    #[test]
    fn test_repeated_scalar() {
        let desc = TypeDescriptor::parse("string[]");
        assert!(desc.is_scalar());
        assert!(desc.repeated);
    }

    #[test]
    fn test_required_field_plain() {
        let field = RequiredField::parse("User", "name").unwrap();
        assert_eq!(field.key, "name");
        assert_eq!(field.checker, None);
    }

    #[test]
    fn test_required_field_splits_on_first_separator() {
        let field = RequiredField::parse("User", "age|int").unwrap();
        assert_eq!(field.key, "age");
        assert_eq!(field.checker, Some(ScalarKind::Int));

        let err = RequiredField::parse("User", "age|int|bool").unwrap_err();
        assert_eq!(err.code(), "MAP_UNKNOWN_TYPE_CHECKER");
    }

    #[test]
    fn test_unknown_checker_is_schema_error() {
        let err = RequiredField::parse("User", "age|integer").unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_predicates_do_not_coerce() {
        assert!(ScalarKind::Int.matches(&json!(24)));
        assert!(!ScalarKind::Int.matches(&json!("24")));
        assert!(!ScalarKind::Int.matches(&json!(24.5)));
        assert!(ScalarKind::Float.matches(&json!(0.035)));
        assert!(!ScalarKind::Float.matches(&json!(1)));
        assert!(ScalarKind::Array.matches(&json!({"a": 1})));
        assert!(ScalarKind::Array.matches(&json!([])));
        assert!(!ScalarKind::Bool.matches(&json!(1)));
        assert!(!ScalarKind::String.matches(&Value::Null));
    }
}
