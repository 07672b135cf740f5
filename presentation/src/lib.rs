//! Presentation layer for course-agents
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the chat HTTP service.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{SimpleProgress, StepReporter};
pub use server::{build_router, ctrl_c, serve};
