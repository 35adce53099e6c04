//! Observability subsystem
//!
//! Structured JSON logging of registry and construction events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on mapping
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use jsonmapper::observability::{Logger, Severity, Event};
//!
//! Logger::set_min_severity(Severity::Info);
//! Logger::info(Event::SchemasLoaded.as_str(), &[("count", "3")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    if event.is_failure() {
        Logger::warn(event.as_str(), fields);
    } else {
        Logger::info(event.as_str(), fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::CommandFailed, &[("code", "MAP_MISSING_FIELD")]);
    }
}
