//! jsonmapper - schema-driven mapping of decoded JSON data into typed
//! object graphs
//!
//! ```ignore
//! use jsonmapper::mapper::{Mapper, Schema, TypeRegistry};
//! use serde_json::json;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     Schema::builder("app::User")
//!         .property("name", "string")
//!         .property("age", "int")
//!         .build(),
//! )?;
//!
//! let user = Mapper::new(registry.into_shared()).map("app::User", json!({"name": "John", "age": "24"}))?;
//! assert_eq!(user.get("age")?.as_int(), Some(24));
//! ```

pub mod cli;
pub mod mapper;
pub mod observability;
