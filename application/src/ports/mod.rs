//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod exercise_service;
pub mod llm_gateway;
pub mod progress;
pub mod trace_sink;
