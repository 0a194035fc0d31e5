//! Observable events
//!
//! Events are explicit and typed. Each carries its own severity.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Schema file loaded and registered
    SchemaLoaded,
    /// Projected schema built
    SchemaProjected,
    /// Selection named unknown fields
    ProjectionRejected,
    /// Record validated and built
    RecordInstantiated,
    /// Record input failed validation
    RecordRejected,
    /// Undeclared key dropped under the lenient policy
    ExtraFieldDropped,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SchemaProjected => "SCHEMA_PROJECTED",
            Event::ProjectionRejected => "PROJECTION_REJECTED",
            Event::RecordInstantiated => "RECORD_INSTANTIATED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::ExtraFieldDropped => "EXTRA_FIELD_DROPPED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::ProjectionRejected | Event::RecordRejected | Event::ExtraFieldDropped => Severity::Warn,
            Event::RecordInstantiated => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Event; 7] = [
        Event::ConfigLoaded,
        Event::SchemaLoaded,
        Event::SchemaProjected,
        Event::ProjectionRejected,
        Event::RecordInstantiated,
        Event::RecordRejected,
        Event::ExtraFieldDropped,
    ];

    #[test]
    fn test_all_events_have_distinct_names() {
        let mut names: Vec<_> = ALL.iter().map(Event::as_str).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
        assert!(names.iter().all(|n| n.chars().all(|c| c.is_ascii_uppercase() || c == '_')));
    }

    #[test]
    fn test_rejections_warn() {
        assert_eq!(Event::ProjectionRejected.severity(), Severity::Warn);
        assert_eq!(Event::ExtraFieldDropped.severity(), Severity::Warn);
        assert_eq!(Event::SchemaProjected.severity(), Severity::Info);
    }
}
