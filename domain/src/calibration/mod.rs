//! Calibration file exercise (E03).
//!
//! - [`document::CalibrationDocument`]: the downloaded file, with repair
//! - [`expression::evaluate`]: integer arithmetic for the `question` fields
//! - [`answers::parse_answer_list`]: the model's `[{"q","a"}]` reply
//! - [`report::CalibrationReport`]: the payload posted back, and flag lookup

pub mod answers;
pub mod document;
pub mod expression;
pub mod report;

use serde::Serialize;
use serde_json::Value;

/// Result of a full calibration run
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationOutcome {
    pub corrected: usize,
    pub open_questions: Vec<String>,
    pub answered: usize,
    pub flag: Option<String>,
    pub reply: Value,
}
