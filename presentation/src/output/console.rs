//! Console output formatter for exercise outcomes

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use course_domain::{CalibrationOutcome, LoginOutcome, VerifyOutcome};
use serde::Serialize;

/// Formats exercise outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a login outcome
    pub fn format_login(outcome: &LoginOutcome) -> String {
        let mut output = Self::header("E01 Login");
        output.push_str(&Self::field("Question:", outcome.question.content()));
        output.push_str(&Self::field("Answer:", outcome.answer.content().trim()));
        output.push_str(&Self::field("Page:", &outcome.page_url));
        if let Some(path) = &outcome.saved_page {
            output.push_str(&Self::field("Saved to:", &path.display().to_string()));
        }
        output.push_str(&Self::flags(&outcome.flags));
        output
    }

    /// Format a verification outcome
    pub fn format_verify(outcome: &VerifyOutcome) -> String {
        let mut output = Self::header("E02 Robot verification");
        output.push_str(&Self::field("msgID:", &outcome.msg_id.to_string()));
        output.push_str(&Self::field("Question:", outcome.question.content()));
        output.push_str(&Self::field("Answer:", outcome.answer.content().trim()));
        output.push_str(&format!(
            "\n{} {}\n",
            "Hidden phrase:".green().bold(),
            outcome.hidden_phrase
        ));
        output
    }

    /// Format a calibration outcome
    pub fn format_calibration(outcome: &CalibrationOutcome) -> String {
        let mut output = Self::header("E03 Calibration");
        output.push_str(&Self::field("Corrected:", &outcome.corrected.to_string()));
        output.push_str(&Self::field(
            "Answered:",
            &format!("{}/{}", outcome.answered, outcome.open_questions.len()),
        ));
        match &outcome.flag {
            Some(flag) => output.push_str(&format!("\n{} {}\n", "Flag:".green().bold(), flag)),
            None => output.push_str(&format!(
                "\n{} {}\n",
                "No flag in reply:".yellow().bold(),
                outcome.reply
            )),
        }
        output
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(outcome: &T) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Pick the text or JSON rendering
    pub fn render<T: Serialize>(
        outcome: &T,
        format: OutputFormat,
        text: impl FnOnce(&T) -> String,
    ) -> String {
        match format {
            OutputFormat::Text => text(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    fn header(title: &str) -> String {
        format!("{}\n\n", format!("=== {} ===", title).cyan().bold())
    }

    fn field(label: &str, value: &str) -> String {
        format!("{} {}\n", label.cyan().bold(), value)
    }

    fn flags(flags: &[String]) -> String {
        if flags.is_empty() {
            return format!("\n{}\n", "No {{...}} flags on the page".yellow());
        }
        let mut output = format!("\n{}\n", "Flags:".green().bold());
        for flag in flags {
            output.push_str(&format!("  * {}\n", flag));
        }
        output
    }
}
