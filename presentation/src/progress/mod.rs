//! Progress display for exercise steps.

pub mod reporter;
