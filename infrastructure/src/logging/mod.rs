//! Logging infrastructure: structured trace logging.
//!
//! Provides [`JsonlTraceSink`], a JSONL file writer that implements the
//! [`TraceSink`](course_application::TraceSink) port.

mod jsonl_trace_sink;

pub use jsonl_trace_sink::JsonlTraceSink;
