//! Application-level configuration.
//!
//! - [`LlmParams`]: model and sampling parameters of one exercise's completion call

pub mod llm_params;

pub use llm_params::LlmParams;
