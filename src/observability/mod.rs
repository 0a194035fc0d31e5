//! Observability for shapeguard
//!
//! Structured JSON-line logging of typed events. Logging is read-only: it
//! never changes the outcome of the operation it describes.
//!
//! # Usage
//!
//! ```ignore
//! use shapeguard::observability::{Logger, Severity, Event, log_event_with_fields};
//!
//! Logger::set_min_severity(Severity::Info);
//! log_event_with_fields(Event::SchemaProjected, &[("schema", "PublicUser")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
