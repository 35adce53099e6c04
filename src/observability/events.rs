//! Observable mapper events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Schema directory loaded
    SchemasLoaded,
    /// One schema added to the registry
    SchemaRegistered,

    // Construction
    /// Root construction begins
    MapBegin,
    /// Root construction complete
    MapComplete,
    /// Required-field validation rejected the input
    ValidationFailed,
    /// A nested type reference did not resolve
    TypeUnresolved,
    /// A null placeholder was coerced on read
    LazyCoercion,

    // CLI
    /// A CLI command failed
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::MapBegin => "MAP_BEGIN",
            Event::MapComplete => "MAP_COMPLETE",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::TypeUnresolved => "TYPE_UNRESOLVED",
            Event::LazyCoercion => "LAZY_COERCION",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Returns true if this event indicates a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::ValidationFailed | Event::TypeUnresolved | Event::CommandFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
