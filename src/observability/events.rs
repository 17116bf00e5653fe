//! Observable events
//!
//! Covers the query path (page serving, fan-out, count degradation) and the
//! record lifecycle (create/update/delete, policy rejections).

use std::fmt;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace,
    /// Normal operations
    Info,
    /// Recoverable issues
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observable events on the query and record paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A page was assembled and returned
    PageServed,
    /// Count query failed; pagination metadata is approximate
    CountDegraded,
    /// Disjunct fan-out queries were merged client-side
    FanOutMerged,
    /// The access policy rejected an operation
    AccessDenied,
    /// A record was created
    RecordCreated,
    /// A record was patched
    RecordUpdated,
    /// A record was hard-deleted
    RecordDeleted,
    /// A create was rejected because of colliding unique fields
    DuplicateRejected,
}

impl Event {
    /// Returns the event name emitted in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Event::PageServed => "page_served",
            Event::CountDegraded => "count_degraded",
            Event::FanOutMerged => "fanout_merged",
            Event::AccessDenied => "access_denied",
            Event::RecordCreated => "record_created",
            Event::RecordUpdated => "record_updated",
            Event::RecordDeleted => "record_deleted",
            Event::DuplicateRejected => "duplicate_rejected",
        }
    }

    /// Returns the severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::PageServed | Event::FanOutMerged => Severity::Trace,
            Event::RecordCreated | Event::RecordUpdated | Event::RecordDeleted => Severity::Info,
            Event::CountDegraded | Event::AccessDenied | Event::DuplicateRejected => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
