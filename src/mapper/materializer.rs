//! Property materialization
//!
//! Turns raw input into a property map, one declared property at a time,
//! in declaration order. Absent (or `null`) inputs become `Null`
//! placeholders without any type resolution; the object coerces them on
//! read.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::coerce::{coerce, to_list, to_map};
use super::collection::CollectionWrapper;
use super::errors::MapperResult;
use super::object::MappedObject;
use super::registry::TypeRegistry;
use super::schema::{PropertyDef, Schema};
use super::types::BaseType;
use super::value::MappedValue;

/// Resolution context of one mapped object
pub(crate) struct Materializer<'a> {
    pub registry: &'a Arc<TypeRegistry>,
    pub schema: &'a Schema,
    pub wrapper: Option<&'a CollectionWrapper>,
}

impl<'a> Materializer<'a> {
    /// Builds the property map: exactly one entry per declared property.
    pub fn materialize(&self, raw: &Map<String, Value>) -> MapperResult<HashMap<String, MappedValue>> {
        let mut properties = HashMap::with_capacity(self.schema.properties.len());

        for property in &self.schema.properties {
            let key = self.schema.source_key(&property.name);
            let value = match raw.get(key) {
                Some(value) if !value.is_null() => self.resolve(property, value)?,
                _ => MappedValue::Null,
            };
            properties.insert(property.name.clone(), value);
        }

        Ok(properties)
    }

    /// Applies the declared type of `property` to a raw value.
    ///
    /// Scalars are coerced; repeated scalars element-wise and never wrapped.
    /// Nested types construct mapped objects, one per element for repeated
    /// descriptors, wrapped by the active collection wrapper if there is one.
    pub fn resolve(&self, property: &PropertyDef, value: &Value) -> MapperResult<MappedValue> {
        let descriptor = property.descriptor();

        match &descriptor.base {
            BaseType::Scalar(kind) if descriptor.repeated => Ok(MappedValue::List(
                to_list(value).iter().map(|item| coerce(*kind, item)).collect(),
            )),
            BaseType::Scalar(kind) => Ok(coerce(*kind, value)),
            BaseType::Nested(type_ref) => {
                let nested = self
                    .registry
                    .lookup(&self.schema.type_name, &property.name, type_ref)?;

                if !descriptor.repeated {
                    let object = self.construct(&nested, to_map(value))?;
                    return Ok(MappedValue::Object(object));
                }

                let objects = to_list(value)
                    .iter()
                    .map(|item| self.construct(&nested, to_map(item)))
                    .collect::<MapperResult<Vec<_>>>()?;

                Ok(match self.wrapper {
                    Some(wrapper) => MappedValue::Collection(wrapper.wrap(objects)),
                    None => MappedValue::List(objects.into_iter().map(MappedValue::Object).collect()),
                })
            }
        }
    }

    fn construct(&self, schema: &Arc<Schema>, raw: Map<String, Value>) -> MapperResult<MappedObject> {
        MappedObject::construct(self.registry, Arc::clone(schema), raw, self.wrapper.cloned())
    }
}
