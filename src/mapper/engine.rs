//! Construction entry point

use serde_json::{Map, Value};
use std::sync::Arc;

use super::errors::{MapperError, MapperResult};
use super::object::MappedObject;
use super::registry::TypeRegistry;
use super::schema::NAMESPACE_SEPARATOR;
use super::types::json_type_name;
use crate::observability::{Event, Logger};

/// Maps decoded JSON data into mapped objects of registered types.
///
/// Holds the shared registry and the collection wrapper to apply, if any.
/// Independent `map` calls share nothing mutable and may run concurrently.
#[derive(Debug, Clone)]
pub struct Mapper {
    registry: Arc<TypeRegistry>,
    collection_wrapper: Option<String>,
}

impl Mapper {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            collection_wrapper: None,
        }
    }

    /// Wraps every nested-object list, at any depth, in the named wrapper.
    pub fn with_collection_wrapper(mut self, name: impl Into<String>) -> Self {
        self.collection_wrapper = Some(name.into());
        self
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn collection_wrapper(&self) -> Option<&str> {
        self.collection_wrapper.as_deref()
    }

    /// Constructs a mapped object of `type_name` from decoded data.
    ///
    /// # Errors
    ///
    /// - `NotAnObject` if `raw` is not a JSON object
    /// - `TypeNotFound` / `WrapperNotFound` for unregistered names
    /// - any validation or schema error raised while constructing
    pub fn map(&self, type_name: &str, raw: Value) -> MapperResult<MappedObject> {
        match raw {
            Value::Object(map) => self.map_object(type_name, map),
            other => Err(MapperError::NotAnObject {
                type_name: type_name.to_string(),
                actual: json_type_name(&other).to_string(),
            }),
        }
    }

    /// Same as [`Mapper::map`], for input already known to be a map.
    pub fn map_object(&self, type_name: &str, raw: Map<String, Value>) -> MapperResult<MappedObject> {
        let type_name = type_name.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(type_name);
        Logger::trace(Event::MapBegin.as_str(), &[("type", type_name)]);

        let schema = self.registry.get(type_name).cloned().ok_or_else(|| MapperError::TypeNotFound {
            field: "$root".to_string(),
            type_ref: type_name.to_string(),
        })?;

        let wrapper = self
            .collection_wrapper
            .as_deref()
            .map(|name| self.registry.wrapper(name))
            .transpose()?;

        let object = MappedObject::construct(&self.registry, schema, raw, wrapper)?;

        Logger::trace(Event::MapComplete.as_str(), &[("type", type_name)]);
        Ok(object)
    }
}
