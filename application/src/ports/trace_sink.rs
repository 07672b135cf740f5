//! Port for recording exercise traces.
//!
//! Defines the [`TraceSink`] trait for recording what each run did (the
//! question fetched, the completion request and response, the submission)
//! as structured records grouped by a trace id.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! exchange in a machine-readable format.

use serde_json::Value;

/// A structured trace event.
///
/// `event_type` names the observation (`trace`, `span`, `generation`,
/// `trace_end`, ...); the payload holds event-specific fields.
#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub trace_id: String,
    pub event_type: &'static str,
    pub payload: Value,
}

impl TraceEvent {
    pub fn new(trace_id: impl Into<String>, event_type: &'static str, payload: Value) -> Self {
        Self {
            trace_id: trace_id.into(),
            event_type,
            payload,
        }
    }
}

/// Port for writing trace events to a structured log.
///
/// `record` is synchronous and infallible: a lost trace record must never
/// fail the exercise itself.
pub trait TraceSink: Send + Sync {
    fn record(&self, event: TraceEvent);
}

/// No-op implementation for tests and when tracing is disabled.
pub struct NoTraceSink;

impl TraceSink for NoTraceSink {
    fn record(&self, _event: TraceEvent) {}
}
