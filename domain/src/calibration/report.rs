//! Report payload sent back to the hub, and flag lookup in its reply.

use super::document::{CalibrationDocument, CalibrationItem};
use serde::Serialize;
use serde_json::Value;

/// Task name the hub expects for this exercise
pub const TASK_NAME: &str = "JSON";

/// Marker the hub puts into a success token
pub const FLAG_MARKER: &str = "FLG";

const DEFAULT_DESCRIPTION: &str = "This is simple calibration data used for testing purposes. Do not use it in production environment!";
const DEFAULT_COPYRIGHT: &str = "Copyright (C) 2238 by BanAN Technologies Inc.";

#[derive(Debug, Clone, Serialize)]
pub struct ReportBody {
    pub apikey: String,
    pub description: String,
    pub copyright: String,
    #[serde(rename = "test-data")]
    pub test_data: Vec<CalibrationItem>,
}

/// `{ task, apikey, answer: { apikey, description, copyright, test-data } }`
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationReport {
    pub task: String,
    pub apikey: String,
    pub answer: ReportBody,
}

impl CalibrationReport {
    /// Build the report from a repaired document, stamping the caller's key
    /// over the placeholder the file ships with
    pub fn from_document(document: CalibrationDocument, apikey: impl Into<String>) -> Self {
        let apikey = apikey.into();
        Self {
            task: TASK_NAME.to_string(),
            apikey: apikey.clone(),
            answer: ReportBody {
                apikey,
                description: document
                    .description
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
                copyright: document
                    .copyright
                    .unwrap_or_else(|| DEFAULT_COPYRIGHT.to_string()),
                test_data: document.test_data,
            },
        }
    }
}

/// The first top-level value of the hub's reply that mentions the flag marker
pub fn find_flag(reply: &Value) -> Option<String> {
    let mentions = |v: &Value| -> Option<String> {
        let text = match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        text.contains(FLAG_MARKER).then_some(text)
    };

    match reply {
        Value::Object(map) => map.values().find_map(mentions),
        other => mentions(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_shape() {
        let doc = CalibrationDocument::parse(
            r#"{"apikey":"%PUT-YOUR-API-KEY-HERE%","description":"d","copyright":"c","test-data":[{"question":"1 + 1","answer":2}]}"#,
        )
        .unwrap();
        let report = CalibrationReport::from_document(doc, "key-123");
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["task"], "JSON");
        assert_eq!(value["apikey"], "key-123");
        assert_eq!(value["answer"]["apikey"], "key-123");
        assert_eq!(value["answer"]["description"], "d");
        assert_eq!(value["answer"]["copyright"], "c");
        assert_eq!(value["answer"]["test-data"][0]["answer"], 2);
    }

    #[test]
    fn test_report_falls_back_to_default_metadata() {
        let doc = CalibrationDocument::parse(r#"{"test-data":[]}"#).unwrap();
        let report = CalibrationReport::from_document(doc, "k");
        assert!(report.answer.copyright.contains("BanAN"));
        assert!(report.answer.description.starts_with("This is simple calibration data"));
    }

    #[test]
    fn test_find_flag_in_object() {
        let reply = json!({"code": 0, "message": "{{FLG:CALIBRATED}}"});
        assert_eq!(find_flag(&reply), Some("{{FLG:CALIBRATED}}".to_string()));
    }

    #[test]
    fn test_find_flag_absent() {
        assert_eq!(find_flag(&json!({"code": -1, "message": "wrong"})), None);
    }

    #[test]
    fn test_find_flag_nested_value_is_stringified() {
        let reply = json!({"data": {"secret": "FLG:DEEP"}});
        let flag = find_flag(&reply).unwrap();
        assert!(flag.contains("FLG:DEEP"));
    }
}
