//! Schema declarations
//!
//! A schema is declared once per mapped type and never mutated:
//! - properties: ordered property name -> type descriptor
//! - aliases: property name -> source key in the input
//! - required: source keys that must be present, optionally `key|type`
//! - format_json: optional pre-processing hook applied to the raw input
//!
//! Schemas are built in code with [`Schema::builder`] or loaded from JSON
//! files. Property order in JSON files is preserved.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use super::errors::MapperResult;
use super::types::{RequiredField, TypeDescriptor};

/// Namespace separator in fully-qualified type names
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Pre-processing hook: reshapes the raw input before validation.
pub type FormatJsonFn = fn(Map<String, Value>) -> Map<String, Value>;

/// One declared property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: String,
    /// Declared type string, e.g. `"int"` or `"User[]"`
    pub type_ref: String,
}

impl PropertyDef {
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::parse(&self.type_ref)
    }
}

/// Complete declaration of one mapped type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// Fully-qualified type name, e.g. `app::models::User`
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "ordered_properties")]
    pub properties: Vec<PropertyDef>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub aliases: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip)]
    pub format_json: Option<FormatJsonFn>,
}

impl Schema {
    pub fn builder(type_name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(type_name)
    }

    /// Returns the declaration of a property
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Input key a property is read from: its alias, or its own name
    pub fn source_key<'a>(&'a self, property: &'a str) -> &'a str {
        self.aliases.get(property).map(String::as_str).unwrap_or(property)
    }

    /// Parses the required field specs in declaration order
    pub fn required_fields(&self) -> MapperResult<Vec<RequiredField>> {
        self.required
            .iter()
            .map(|spec| RequiredField::parse(&self.type_name, spec))
            .collect()
    }

    /// Runs the pre-processing hook; identity when none is declared
    pub fn format_json(&self, raw: Map<String, Value>) -> Map<String, Value> {
        match self.format_json {
            Some(hook) => hook(raw),
            None => raw,
        }
    }

    /// Namespace path of this type, without the short name
    pub fn namespace(&self) -> &str {
        self.type_name
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map(|(namespace, _)| namespace)
            .unwrap_or("")
    }

    /// Validates the schema declaration itself (not an input document)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.type_name.is_empty() {
            return Err("Schema must define a type name".into());
        }

        let mut seen = HashSet::new();
        for property in &self.properties {
            if property.name.is_empty() {
                return Err("Property names must not be empty".into());
            }
            if !seen.insert(property.name.as_str()) {
                return Err(format!("Duplicate property '{}'", property.name));
            }
            if property.descriptor().nested_type() == Some("") {
                return Err(format!("Property '{}' has an empty type", property.name));
            }
        }

        for property in self.aliases.keys() {
            if !seen.contains(property.as_str()) {
                return Err(format!("Alias for undeclared property '{}'", property));
            }
        }

        self.required_fields().map_err(|e| e.to_string())?;

        Ok(())
    }
}

/// Builder for schemas declared in code
#[derive(Debug)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    fn new(type_name: impl Into<String>) -> Self {
        Self {
            schema: Schema {
                type_name: type_name.into(),
                description: None,
                properties: Vec::new(),
                aliases: HashMap::new(),
                required: Vec::new(),
                format_json: None,
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.schema.description = Some(description.into());
        self
    }

    pub fn property(mut self, name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        self.schema.properties.push(PropertyDef {
            name: name.into(),
            type_ref: type_ref.into(),
        });
        self
    }

    /// Reads `property` from input key `source_key`
    pub fn alias(mut self, property: impl Into<String>, source_key: impl Into<String>) -> Self {
        self.schema.aliases.insert(property.into(), source_key.into());
        self
    }

    /// Adds a required field spec (`key` or `key|type`)
    pub fn required(mut self, spec: impl Into<String>) -> Self {
        self.schema.required.push(spec.into());
        self
    }

    pub fn format_json(mut self, hook: FormatJsonFn) -> Self {
        self.schema.format_json = Some(hook);
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

/// (De)serializes properties as a JSON object, keeping declaration order.
mod ordered_properties {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    use super::PropertyDef;

    pub fn serialize<S: Serializer>(
        properties: &[PropertyDef],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(properties.len()))?;
        for property in properties {
            map.serialize_entry(&property.name, &property.type_ref)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<PropertyDef>, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Vec<PropertyDef>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property name to type descriptor")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut properties = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, type_ref)) = access.next_entry::<String, String>()? {
                    properties.push(PropertyDef { name, type_ref });
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}
