//! Log file configuration (`[logging]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory of the daily `course-agents.log` files
    pub dir: PathBuf,
    /// Write logs to a file next to the console output
    pub file: bool,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file: true,
        }
    }
}
