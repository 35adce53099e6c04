//! Type registry
//!
//! Maps fully-qualified type names to their schemas and collection-wrapper
//! names to factories. The registry is filled once at startup, from code or
//! from a directory of `*.json` schema files, then frozen behind an `Arc`
//! and shared read-only by every construction.
//!
//! Nested types may be declared by bare name. They resolve relative to the
//! namespace of the declaring type, walking outward toward the root.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::collection::{CollectionFactory, CollectionWrapper};
use super::errors::{MapperError, MapperResult};
use super::schema::{Schema, NAMESPACE_SEPARATOR};
use crate::observability::{log_event_with_fields, Event, Logger};

/// Registry of mapped types and collection wrappers.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Directory holding schema files, if any
    schema_dir: Option<PathBuf>,
    /// Schemas indexed by fully-qualified type name
    schemas: HashMap<String, Arc<Schema>>,
    /// Wrapper factories indexed by wrapper name
    wrappers: HashMap<String, CollectionFactory>,
}

impl TypeRegistry {
    /// Creates an empty registry for schemas declared in code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry that loads schema files from `schema_dir`.
    pub fn with_schema_dir(schema_dir: &Path) -> Self {
        Self {
            schema_dir: Some(schema_dir.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn schema_dir(&self) -> Option<&Path> {
        self.schema_dir.as_deref()
    }

    /// Loads every `*.json` schema file from the schema directory.
    ///
    /// A missing directory is an empty registry. Non-JSON files are skipped.
    /// Files are loaded in name order so duplicate reports are stable.
    pub fn load_all(&mut self) -> MapperResult<()> {
        let Some(schema_dir) = self.schema_dir.clone() else {
            return Ok(());
        };

        if !schema_dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&schema_dir).map_err(|e| {
            MapperError::malformed(
                schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                MapperError::malformed(
                    schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }

        let count = self.schemas.len().to_string();
        let dir = schema_dir.display().to_string();
        log_event_with_fields(Event::SchemasLoaded, &[("count", count.as_str()), ("dir", dir.as_str())]);

        Ok(())
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> MapperResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            MapperError::malformed(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let schema: Schema = serde_json::from_str(&content).map_err(|e| {
            MapperError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|e| MapperError::malformed(path.display().to_string(), e))?;

        self.insert(schema)
    }

    /// Registers a schema declared in code.
    ///
    /// # Errors
    ///
    /// `MalformedSchema` if the declaration is inconsistent,
    /// `DuplicateType` if the type name is already registered.
    pub fn register(&mut self, schema: Schema) -> MapperResult<()> {
        schema
            .validate_structure()
            .map_err(|e| MapperError::malformed(schema.type_name.clone(), e))?;

        self.insert(schema)
    }

    fn insert(&mut self, schema: Schema) -> MapperResult<()> {
        if self.schemas.contains_key(&schema.type_name) {
            return Err(MapperError::DuplicateType(schema.type_name));
        }

        Logger::trace(
            Event::SchemaRegistered.as_str(),
            &[("type", schema.type_name.as_str())],
        );
        self.schemas.insert(schema.type_name.clone(), Arc::new(schema));
        Ok(())
    }

    /// Registers a collection wrapper under `name`.
    pub fn register_wrapper(&mut self, name: impl Into<String>, factory: CollectionFactory) -> MapperResult<()> {
        let name = name.into();
        if self.wrappers.contains_key(&name) {
            return Err(MapperError::DuplicateType(name));
        }
        self.wrappers.insert(name, factory);
        Ok(())
    }

    /// Freezes the registry for shared read-only use.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Gets a schema by fully-qualified type name.
    pub fn get(&self, type_name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    /// Returns all registered schemas, ordered by type name.
    pub fn schemas(&self) -> Vec<&Arc<Schema>> {
        let mut schemas: Vec<_> = self.schemas.values().collect();
        schemas.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        schemas
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Looks up a collection wrapper by name.
    pub fn wrapper(&self, name: &str) -> MapperResult<CollectionWrapper> {
        self.wrappers
            .get(name)
            .map(|factory| CollectionWrapper::new(name, *factory))
            .ok_or_else(|| MapperError::WrapperNotFound(name.to_string()))
    }

    /// Resolves a declared nested type reference to a registered type name.
    ///
    /// A reference starting with `::` is rooted and used as-is. Otherwise the
    /// namespace of `declaring_type` is stripped one segment at a time and
    /// `<namespace>::<type_ref>` is tried at each level, the root last.
    /// Returns `type_ref` unchanged when nothing matches.
    pub fn resolve_type(&self, declaring_type: &str, type_ref: &str) -> String {
        if let Some(rooted) = type_ref.strip_prefix(NAMESPACE_SEPARATOR) {
            return rooted.to_string();
        }

        let mut segments: Vec<&str> = declaring_type.split(NAMESPACE_SEPARATOR).collect();
        while segments.pop().is_some() {
            let candidate = if segments.is_empty() {
                type_ref.to_string()
            } else {
                format!("{}{}{}", segments.join(NAMESPACE_SEPARATOR), NAMESPACE_SEPARATOR, type_ref)
            };
            if self.schemas.contains_key(&candidate) {
                return candidate;
            }
        }

        type_ref.to_string()
    }

    /// Resolves and fetches the schema for a nested property type.
    pub fn lookup(&self, declaring_type: &str, field: &str, type_ref: &str) -> MapperResult<Arc<Schema>> {
        let resolved = self.resolve_type(declaring_type, type_ref);
        match self.schemas.get(&resolved) {
            Some(schema) => Ok(Arc::clone(schema)),
            None => {
                Logger::warn(
                    Event::TypeUnresolved.as_str(),
                    &[("declaring_type", declaring_type), ("field", field), ("type", type_ref)],
                );
                Err(MapperError::TypeNotFound {
                    field: field.to_string(),
                    type_ref: type_ref.to_string(),
                })
            }
        }
    }

    /// Verifies every nested type reference of every schema resolves.
    pub fn check(&self) -> MapperResult<()> {
        for schema in self.schemas() {
            for property in &schema.properties {
                if let Some(type_ref) = property.descriptor().nested_type() {
                    self.lookup(&schema.type_name, &property.name, type_ref)?;
                }
            }
        }
        Ok(())
    }

    /// Saves a schema as `<type_name>.json` in the schema directory.
    ///
    /// `::` in the type name becomes `.` in the file name.
    pub fn save_schema(&self, schema: &Schema) -> MapperResult<PathBuf> {
        let schema_dir = self.schema_dir.as_deref().ok_or_else(|| {
            MapperError::malformed(schema.type_name.clone(), "Registry has no schema directory")
        })?;

        let filename = format!("{}.json", schema.type_name.replace(NAMESPACE_SEPARATOR, "."));
        let path = schema_dir.join(filename);

        if path.exists() {
            return Err(MapperError::DuplicateType(schema.type_name.clone()));
        }

        fs::create_dir_all(schema_dir).map_err(|e| {
            MapperError::malformed(
                schema_dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            MapperError::malformed(path.display().to_string(), format!("Failed to serialize schema: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            MapperError::malformed(path.display().to_string(), format!("Failed to write file: {}", e))
        })?;

        Ok(path)
    }
}
