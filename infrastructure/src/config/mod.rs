//! Configuration file loading for course-agents
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `COURSE_` (`COURSE_LOGIN__URL`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./course-agents.toml` or `./.course-agents.toml`
//! 4. Global: `$XDG_CONFIG_HOME/course-agents/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCalibrationConfig, FileChatConfig, FileConfig, FileHttpConfig,
    FileLoggingConfig, FileLoginConfig, FileOpenAiConfig, FileVerifyConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
