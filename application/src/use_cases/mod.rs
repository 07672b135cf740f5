//! Use cases
//!
//! Application-level operations that orchestrate domain logic, one per
//! exercise.

pub mod run_calibration;
pub mod run_chat;
pub mod run_login;
pub mod run_verify;
pub(crate) mod shared;
