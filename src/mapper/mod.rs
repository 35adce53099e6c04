//! Mapping engine
//!
//! Maps decoded JSON data (maps, lists, scalars) into mapped objects
//! according to per-type declared schemas.
//!
//! # Flow
//!
//! raw input -> pre-processing hook -> required-field validation ->
//! materialization (type descriptors, type resolution, coercion, nested
//! constructions) -> mapped object
//!
//! # Design Principles
//!
//! - Schemas are immutable once registered
//! - Coercion is permissive and never fails
//! - Absent properties are coerced lazily on read
//! - Every failure aborts the construction; no partial objects

mod coerce;
mod collection;
mod engine;
mod errors;
mod materializer;
mod object;
mod registry;
mod schema;
mod types;
mod validator;
mod value;

pub use coerce::{coerce, to_bool, to_float, to_int, to_list, to_map, to_string};
pub use collection::{Collection, CollectionFactory, CollectionWrapper, ObjectCollection};
pub use engine::Mapper;
pub use errors::{ErrorKind, MapperError, MapperResult};
pub use object::MappedObject;
pub use registry::TypeRegistry;
pub use schema::{FormatJsonFn, PropertyDef, Schema, SchemaBuilder, NAMESPACE_SEPARATOR};
pub use types::{BaseType, RequiredField, ScalarKind, TypeDescriptor};
pub use validator::validate_required;
pub use value::MappedValue;
