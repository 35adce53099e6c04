//! Materialized property values

use serde_json::{Map, Value};
use std::sync::Arc;

use super::collection::Collection;
use super::object::MappedObject;

/// A value held in a mapped object's property map.
#[derive(Debug, Clone)]
pub enum MappedValue {
    /// Placeholder for a declared property absent from the input
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// `array` kind coerced from a list or scalar
    Array(Vec<Value>),
    /// `array` kind coerced from a map; keys are kept
    Map(Map<String, Value>),
    Object(MappedObject),
    /// Repeated descriptor without a collection wrapper
    List(Vec<MappedValue>),
    /// Nested-object list re-wrapped by a collection wrapper
    Collection(Arc<dyn Collection>),
    /// Written under an undeclared name, stored verbatim
    Raw(Value),
}

impl MappedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, MappedValue::Null | MappedValue::Raw(Value::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MappedValue::String(s) => Some(s),
            MappedValue::Raw(value) => value.as_str(),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MappedValue::Int(i) => Some(*i),
            MappedValue::Raw(value) => value.as_i64(),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            MappedValue::Float(f) => Some(*f),
            MappedValue::Raw(value) => value.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MappedValue::Bool(b) => Some(*b),
            MappedValue::Raw(value) => value.as_bool(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            MappedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            MappedValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&MappedObject> {
        match self {
            MappedValue::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MappedValue]> {
        match self {
            MappedValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&dyn Collection> {
        match self {
            MappedValue::Collection(collection) => Some(collection.as_ref()),
            _ => None,
        }
    }

    /// Returns the raw value of an undeclared property
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            MappedValue::Raw(value) => Some(value),
            _ => None,
        }
    }

    /// Mapped objects of a nested list, wrapped or not
    pub fn objects(&self) -> Vec<&MappedObject> {
        match self {
            MappedValue::List(items) => items.iter().filter_map(MappedValue::as_object).collect(),
            MappedValue::Collection(collection) => collection.items().iter().collect(),
            MappedValue::Object(object) => vec![object],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(MappedValue::Int(24).as_int(), Some(24));
        assert_eq!(MappedValue::Int(24).as_str(), None);
        assert_eq!(MappedValue::String("John".into()).as_str(), Some("John"));
        assert_eq!(MappedValue::Float(0.035).as_float(), Some(0.035));
        assert_eq!(MappedValue::Bool(true).as_bool(), Some(true));
    }

    #[test]
    fn test_raw_accessors_read_through() {
        let raw = MappedValue::Raw(json!("verbatim"));
        assert_eq!(raw.as_str(), Some("verbatim"));
        assert_eq!(raw.as_raw(), Some(&json!("verbatim")));
        assert!(MappedValue::Raw(Value::Null).is_null());
    }

    #[test]
    fn test_null_placeholder() {
        assert!(MappedValue::Null.is_null());
        assert!(MappedValue::Null.objects().is_empty());
    }
}
