//! Observable events of the query engine

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Pipeline execution starts
    QueryBegin,
    /// Pipeline built (terminal operators have run)
    QueryComplete,
    /// Pipeline failed synchronously
    QueryRejected,
    /// A run of ordering parts was fused into one sort
    OrderFused,
    /// A single part was dispatched to its operator
    OperatorDispatch,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::QueryBegin => "QUERY_BEGIN",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::OrderFused => "ORDER_FUSED",
            Event::OperatorDispatch => "OPERATOR_DISPATCH",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigLoaded => Severity::Info,
            Event::QueryBegin
            | Event::QueryComplete
            | Event::OrderFused
            | Event::OperatorDispatch => Severity::Trace,
            Event::QueryRejected => Severity::Warn,
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

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::QueryBegin,
            Event::QueryComplete,
            Event::QueryRejected,
            Event::OrderFused,
            Event::OperatorDispatch,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::QueryRejected.severity(), Severity::Warn);
        assert_eq!(Event::OrderFused.severity(), Severity::Trace);
        assert_eq!(Event::QueryComplete.severity(), Severity::Trace);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::OrderFused), "ORDER_FUSED");
    }
}
