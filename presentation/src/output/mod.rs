//! Output formatting for exercise outcomes.

pub mod console;
