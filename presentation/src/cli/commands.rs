//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for exercise results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// The full outcome as JSON
    Json,
}

/// CLI arguments for course-agents
#[derive(Parser, Debug)]
#[command(name = "course-agents")]
#[command(author, version, about = "Small LLM agent exercises: scrape, ask, submit")]
#[command(arg_required_else_help = true)]
#[command(long_about = r#"
course-agents runs one exercise per subcommand. Each exercise fetches a
dynamic question, asks a hosted language model and submits the answer to
obtain a flag.

Configuration files are loaded from (in priority order):
1. COURSE_* environment variables (COURSE_LOGIN__URL, ...)
2. --config <path>          Explicit config file
3. ./course-agents.toml     Project-level config
4. ~/.config/course-agents/config.toml   Global config

A .env file in the working directory is loaded first.

Example:
  course-agents login --url https://login.example/ --username tester
  course-agents verify
  course-agents -v calibrate --hub-url https://hub.example
  course-agents serve --bind 127.0.0.1:3000
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Directory for log files (overrides [logging].dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

/// One subcommand per exercise
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// E01: answer the login page question and log in
    Login(LoginArgs),
    /// E02: pass the robot verification conversation
    Verify(VerifyArgs),
    /// E03: repair and report the calibration file
    Calibrate(CalibrateArgs),
    /// E04: run the traced chat HTTP service
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LoginArgs {
    /// Login page URL (overrides [login].url)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Username (overrides [login].username)
    #[arg(long)]
    pub username: Option<String>,

    /// Completion model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct VerifyArgs {
    /// Verification endpoint (overrides [verify].endpoint)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Completion model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CalibrateArgs {
    /// Hub base URL (overrides [calibration].hub_url)
    #[arg(long, value_name = "URL")]
    pub hub_url: Option<String>,

    /// Completion model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    /// Listen address (overrides [chat].bind)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Completion model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_login_with_globals() {
        let cli = Cli::try_parse_from([
            "course-agents",
            "-vv",
            "login",
            "--url",
            "https://login.example/",
            "--model",
            "gpt-4o",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
        let command = cli.command.unwrap();
        assert!(matches!(
            command,
            Command::Login(LoginArgs { url: Some(ref u), username: None, model: Some(ref m) })
                if u == "https://login.example/" && m == "gpt-4o"
        ));
    }

    #[test]
    fn test_parse_serve_bind() {
        let cli = Cli::try_parse_from(["course-agents", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Serve(ServeArgs {
                bind: Some("0.0.0.0:8080".to_string()),
                model: None,
            }))
        );
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::try_parse_from(["course-agents", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
