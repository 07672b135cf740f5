//! Prompt domain
//!
//! System prompts and user-message builders for each exercise.

mod template;

pub use template::PromptTemplate;
