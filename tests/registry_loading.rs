//! Registry Loading Tests
//!
//! - Schema files load in declaration order of their properties
//! - Malformed and duplicate schema files fail the load
//! - Saved schemas load back into an equivalent registry
//! - Relative type references resolve from the declaring namespace outward

use jsonmapper::mapper::{Mapper, Schema, TypeRegistry};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_schema(dir: &Path, file: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

fn load(dir: &Path) -> TypeRegistry {
    let mut registry = TypeRegistry::with_schema_dir(dir);
    registry.load_all().unwrap();
    registry
}

#[test]
fn test_load_preserves_property_order() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        tmp.path(),
        "app.User.json",
        r#"{
            "type_name": "app::User",
            "properties": {"surname": "string", "name": "string", "age": "int"}
        }"#,
    );

    let registry = load(tmp.path());
    let user = registry.get("app::User").unwrap();
    let names: Vec<_> = user.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["surname", "name", "age"]);
}

#[test]
fn test_non_json_files_are_skipped() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        tmp.path(),
        "app.User.json",
        r#"{"type_name": "app::User", "properties": {"name": "string"}}"#,
    );
    write_schema(tmp.path(), "README.md", "not a schema");

    let registry = load(tmp.path());
    assert_eq!(registry.schema_count(), 1);
}

#[test]
fn test_missing_directory_is_empty() {
    let tmp = TempDir::new().unwrap();
    let registry = load(&tmp.path().join("absent"));
    assert_eq!(registry.schema_count(), 0);
}

#[test]
fn test_malformed_json_fails_load() {
    let tmp = TempDir::new().unwrap();
    write_schema(tmp.path(), "broken.json", r#"{"type_name": "app::User", "#);

    let mut registry = TypeRegistry::with_schema_dir(tmp.path());
    let err = registry.load_all().unwrap_err();
    assert!(err.is_schema());
    assert_eq!(err.code(), "MAP_MALFORMED_SCHEMA");
}

#[test]
fn test_alias_for_undeclared_property_fails_load() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        tmp.path(),
        "app.User.json",
        r#"{
            "type_name": "app::User",
            "properties": {"name": "string"},
            "aliases": {"surname": "last_name"}
        }"#,
    );

    let mut registry = TypeRegistry::with_schema_dir(tmp.path());
    assert_eq!(registry.load_all().unwrap_err().code(), "MAP_MALFORMED_SCHEMA");
}

#[test]
fn test_unknown_type_checker_fails_load() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        tmp.path(),
        "app.User.json",
        r#"{
            "type_name": "app::User",
            "properties": {"name": "string"},
            "required": ["name|text"]
        }"#,
    );

    let mut registry = TypeRegistry::with_schema_dir(tmp.path());
    assert!(registry.load_all().is_err());
}

#[test]
fn test_duplicate_type_fails_load() {
    let tmp = TempDir::new().unwrap();
    let schema = r#"{"type_name": "app::User", "properties": {"name": "string"}}"#;
    write_schema(tmp.path(), "a.json", schema);
    write_schema(tmp.path(), "b.json", schema);

    let mut registry = TypeRegistry::with_schema_dir(tmp.path());
    assert_eq!(registry.load_all().unwrap_err().code(), "MAP_DUPLICATE_TYPE");
}

#[test]
fn test_saved_schema_loads_back() {
    let tmp = TempDir::new().unwrap();
    let schema = Schema::builder("app::models::Account")
        .description("Account record")
        .property("login", "string")
        .property("surname", "string")
        .alias("surname", "last_name")
        .required("login|string")
        .build();

    let writer = TypeRegistry::with_schema_dir(tmp.path());
    let path = writer.save_schema(&schema).unwrap();
    assert!(path.ends_with("app.models.Account.json"));

    let registry = load(tmp.path());
    let loaded = registry.get("app::models::Account").unwrap();
    assert_eq!(loaded.description.as_deref(), Some("Account record"));
    assert_eq!(loaded.source_key("surname"), "last_name");
    assert_eq!(loaded.required, ["login|string"]);
}

#[test]
fn test_check_reports_unresolvable_reference() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        tmp.path(),
        "app.Data.json",
        r#"{"type_name": "app::Data", "properties": {"meta": "Meta"}}"#,
    );

    let registry = load(tmp.path());
    let err = registry.check().unwrap_err();
    assert_eq!(err.code(), "MAP_TYPE_NOT_FOUND");
}

#[test]
fn test_loaded_schemas_map_across_namespaces() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        tmp.path(),
        "common.Meta.json",
        r#"{"type_name": "common::Meta", "properties": {"took": "float"}}"#,
    );
    write_schema(
        tmp.path(),
        "app.api.Meta.json",
        r#"{"type_name": "app::api::Meta", "properties": {"version": "string"}}"#,
    );
    write_schema(
        tmp.path(),
        "app.api.Data.json",
        r#"{
            "type_name": "app::api::Data",
            "properties": {"local": "Meta", "shared": "::common::Meta"}
        }"#,
    );

    let registry = load(tmp.path());
    registry.check().unwrap();

    let mapper = Mapper::new(registry.into_shared());
    let data = mapper
        .map(
            "app::api::Data",
            json!({"local": {"version": "2"}, "shared": {"took": 0.5}}),
        )
        .unwrap();

    let local = data.get("local").unwrap();
    assert_eq!(local.as_object().unwrap().type_name(), "app::api::Meta");

    let shared = data.get("shared").unwrap();
    let shared = shared.as_object().unwrap();
    assert_eq!(shared.type_name(), "common::Meta");
    assert_eq!(shared.get("took").unwrap().as_float(), Some(0.5));
}
