//! Calibration document as downloaded from the hub.
//!
//! Unknown fields are carried through untouched so the report echoes the
//! document back with only the repaired values changed.

use super::expression::evaluate;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An open question attached to a calibration item, answered by the model.
///
/// Both fields may be missing in the file; a probe without `q` is left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestProbe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub a: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One `test-data` entry: an arithmetic question, its claimed answer, and
/// optionally an open question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationItem {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<TestProbe>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single correction made by [`CalibrationDocument::repair`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correction {
    pub question: String,
    pub claimed: Value,
    pub expected: i64,
}

/// What [`CalibrationDocument::repair`] changed and what is left open
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepairReport {
    pub corrections: Vec<Correction>,
    pub open_questions: Vec<String>,
}

/// The downloaded calibration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationDocument {
    #[serde(default)]
    pub apikey: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(rename = "test-data", default)]
    pub test_data: Vec<CalibrationItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalibrationDocument {
    /// Parse the raw file text
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::InvalidCalibrationData(e.to_string()))
    }

    /// Recompute every arithmetic answer and collect open test questions.
    ///
    /// Items with an empty question or a null answer are not checked.
    /// An unparseable expression aborts the repair with an error naming
    /// the offending item.
    pub fn repair(&mut self) -> Result<RepairReport, DomainError> {
        let mut report = RepairReport::default();

        for (index, item) in self.test_data.iter_mut().enumerate() {
            if !item.question.trim().is_empty() && !item.answer.is_null() {
                let expected = evaluate(&item.question).map_err(|e| {
                    DomainError::InvalidCalibrationItem {
                        index,
                        question: item.question.clone(),
                        source: Box::new(e),
                    }
                })?;
                if item.answer.as_i64() != Some(expected) {
                    report.corrections.push(Correction {
                        question: item.question.clone(),
                        claimed: item.answer.clone(),
                        expected,
                    });
                    item.answer = Value::from(expected);
                }
            }

            if let Some(q) = item.test.as_ref().and_then(|t| t.q.as_ref()) {
                report.open_questions.push(q.clone());
            }
        }

        Ok(report)
    }

    /// Fill `test.a` from the model's answers, matching on the exact
    /// question text. Returns the number of probes filled.
    pub fn apply_answers(&mut self, answers: &[super::answers::ProbeAnswer]) -> usize {
        let mut filled = 0;
        for test in self.test_data.iter_mut().filter_map(|i| i.test.as_mut()) {
            let Some(q) = test.q.as_deref() else {
                continue;
            };
            if let Some(found) = answers.iter().find(|a| a.q == q) {
                test.a = found.a.clone();
                filled += 1;
            }
        }
        filled
    }
}
