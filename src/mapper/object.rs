//! Mapped objects
//!
//! A mapped object is bound to one schema and owns its property map.
//! Construction runs, exactly once each and in order:
//! 1. the schema's pre-processing hook
//! 2. required-field validation on the pre-processed input
//! 3. materialization of every declared property
//!
//! Afterwards the property map is reached only through `get`, `set`,
//! `contains` and `remove`.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::collection::CollectionWrapper;
use super::errors::{MapperError, MapperResult};
use super::materializer::Materializer;
use super::registry::TypeRegistry;
use super::schema::Schema;
use super::validator::validate_required;
use super::value::MappedValue;
use crate::observability::{Event, Logger};

/// An instance of a mapped type.
#[derive(Clone)]
pub struct MappedObject {
    schema: Arc<Schema>,
    registry: Arc<TypeRegistry>,
    /// Active wrapper, propagated to nested constructions
    wrapper: Option<CollectionWrapper>,
    properties: HashMap<String, MappedValue>,
}

impl MappedObject {
    pub(crate) fn construct(
        registry: &Arc<TypeRegistry>,
        schema: Arc<Schema>,
        raw: Map<String, Value>,
        wrapper: Option<CollectionWrapper>,
    ) -> MapperResult<Self> {
        let raw = schema.format_json(raw);
        validate_required(&schema, &raw)?;

        let properties = Materializer {
            registry,
            schema: &schema,
            wrapper: wrapper.as_ref(),
        }
        .materialize(&raw)?;

        Ok(Self {
            schema,
            registry: Arc::clone(registry),
            wrapper,
            properties,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.schema.type_name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Name of the collection wrapper propagated to this object
    pub fn collection_wrapper(&self) -> Option<&str> {
        self.wrapper.as_ref().map(CollectionWrapper::name)
    }

    /// Reads a property.
    ///
    /// A declared property holding a `Null` placeholder is coerced on the
    /// fly, as if its input had been `null`: `""`, `0`, `false`, an empty
    /// list, or a nested object built from an empty map. The placeholder
    /// itself stays in place. Undeclared properties come back verbatim.
    ///
    /// # Errors
    ///
    /// `PropertyNotFound` if `name` is not in the property map; any
    /// construction error of a lazily built nested object.
    pub fn get(&self, name: &str) -> MapperResult<MappedValue> {
        let stored = self.properties.get(name).ok_or_else(|| MapperError::PropertyNotFound {
            type_name: self.schema.type_name.clone(),
            property: name.to_string(),
        })?;

        match (stored, self.schema.property(name)) {
            (MappedValue::Null, Some(property)) => {
                Logger::trace(
                    Event::LazyCoercion.as_str(),
                    &[("property", name), ("type", self.type_name())],
                );
                self.materializer().resolve(property, &Value::Null)
            }
            _ => Ok(stored.clone()),
        }
    }

    /// Writes a property, overwriting any previous value.
    ///
    /// Declared properties go through the same type resolution as at
    /// construction; undeclared names store the value verbatim.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> MapperResult<()> {
        let value = value.into();
        let resolved = match self.schema.property(name) {
            Some(property) => self.materializer().resolve(property, &value)?,
            None => MappedValue::Raw(value),
        };
        self.properties.insert(name.to_string(), resolved);
        Ok(())
    }

    /// True if `name` is in the property map. Never coerces.
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Deletes a property; no-op if absent.
    pub fn remove(&mut self, name: &str) -> Option<MappedValue> {
        self.properties.remove(name)
    }

    /// Names in the property map: declared ones in order, then the rest sorted
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .schema
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| self.properties.contains_key(*name))
            .collect();

        let mut extra: Vec<&str> = self
            .properties
            .keys()
            .map(String::as_str)
            .filter(|name| !self.schema.declares(name))
            .collect();
        extra.sort_unstable();

        names.extend(extra);
        names
    }

    fn materializer(&self) -> Materializer<'_> {
        Materializer {
            registry: &self.registry,
            schema: &self.schema,
            wrapper: self.wrapper.as_ref(),
        }
    }
}

impl fmt::Debug for MappedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dump = f.debug_struct(self.type_name());
        for name in self.property_names() {
            if let Some(value) = self.properties.get(name) {
                dump.field(name, value);
            }
        }
        dump.finish()
    }
}
