//! Run Calibration use case (E03).
//!
//! Downloads the calibration file, repairs its arithmetic answers, asks the
//! model for the open test questions and reports the corrected file back.

use crate::config::LlmParams;
use crate::ports::exercise_service::{CalibrationHub, ServiceError};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{ExerciseStep, ProgressNotifier};
use crate::ports::trace_sink::{NoTraceSink, TraceEvent, TraceSink};
use crate::use_cases::shared::{run_step, traced_completion};
use course_domain::{
    CalibrationDocument, CalibrationOutcome, CalibrationReport, DomainError, ProbeAnswer,
    PromptTemplate, find_flag, parse_answer_list,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during the calibration exercise.
#[derive(Error, Debug)]
pub enum RunCalibrationError {
    #[error("Failed to download the calibration file: {0}")]
    DownloadFailed(#[source] ServiceError),

    #[error("Failed to send the report: {0}")]
    ReportFailed(#[source] ServiceError),

    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the [`RunCalibrationUseCase`].
#[derive(Debug, Clone)]
pub struct RunCalibrationInput {
    /// Key used both in the download URL and inside the report.
    pub api_key: String,
    pub params: LlmParams,
}

impl RunCalibrationInput {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            params: LlmParams::calibration(),
        }
    }

    pub fn with_params(mut self, params: LlmParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for the calibration exercise.
pub struct RunCalibrationUseCase {
    gateway: Arc<dyn LlmGateway>,
    hub: Arc<dyn CalibrationHub>,
    trace_sink: Arc<dyn TraceSink>,
}

impl RunCalibrationUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, hub: Arc<dyn CalibrationHub>) -> Self {
        Self {
            gateway,
            hub,
            trace_sink: Arc::new(NoTraceSink),
        }
    }

    /// Create with a trace sink.
    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = sink;
        self
    }

    pub async fn execute(
        &self,
        input: RunCalibrationInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<CalibrationOutcome, RunCalibrationError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        info!(trace_id = %trace_id, "Starting calibration exercise");

        let raw = run_step(progress, ExerciseStep::Download, async {
            self.hub
                .download(&input.api_key)
                .await
                .map_err(RunCalibrationError::DownloadFailed)
        })
        .await?;
        debug!(bytes = raw.len(), "Calibration file downloaded");

        let mut document = CalibrationDocument::parse(&raw)?;
        let repair = run_step(progress, ExerciseStep::Repair, async { document.repair() }).await?;
        for correction in &repair.corrections {
            warn!(
                "Answer mismatch for question '{}': claimed {}, expected {}",
                correction.question, correction.claimed, correction.expected
            );
        }
        info!(
            items = document.test_data.len(),
            corrected = repair.corrections.len(),
            open = repair.open_questions.len(),
            "Test data processed"
        );
        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "trace",
            json!({
                "name": "calibration",
                "corrections": repair.corrections,
                "input": repair.open_questions,
            }),
        ));

        let answers = if repair.open_questions.is_empty() {
            info!("No open test questions, skipping the model call");
            Vec::new()
        } else {
            self.answer_open_questions(&repair.open_questions, &input.params, &trace_id, progress)
                .await?
        };
        let answered = document.apply_answers(&answers);
        info!(answered, "Test answers updated");

        let report = CalibrationReport::from_document(document, input.api_key.clone());
        let reply = run_step(progress, ExerciseStep::Report, async {
            self.hub
                .submit_report(&report)
                .await
                .map_err(RunCalibrationError::ReportFailed)
        })
        .await?;

        let flag = find_flag(&reply);
        match &flag {
            Some(flag) => info!("Found phrase with 'FLG': {}", flag),
            None => warn!("No phrase with 'FLG' found in the response"),
        }
        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "trace_end",
            json!({ "output": reply, "flag": flag }),
        ));

        Ok(CalibrationOutcome {
            corrected: repair.corrections.len(),
            open_questions: repair.open_questions,
            answered,
            flag,
            reply,
        })
    }

    async fn answer_open_questions(
        &self,
        questions: &[String],
        params: &LlmParams,
        trace_id: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<ProbeAnswer>, RunCalibrationError> {
        info!("Querying the model with questions: {:?}", questions);
        let request = params.system_and_user(
            PromptTemplate::calibration_system(),
            &PromptTemplate::calibration_questions(questions),
        );
        let response = run_step(progress, ExerciseStep::AskModel, async {
            traced_completion(
                self.gateway.as_ref(),
                self.trace_sink.as_ref(),
                trace_id,
                "answer_test_questions",
                &request,
            )
            .await
        })
        .await?;

        let answers = parse_answer_list(&response.text)?;
        info!("Received {} answers from the model", answers.len());
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::shared::test_support::ScriptedGateway;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockHub {
        file: String,
        reply: Value,
        downloaded_with: Mutex<Option<String>>,
        reports: Mutex<Vec<Value>>,
    }

    impl MockHub {
        fn new(file: &str, reply: Value) -> Self {
            Self {
                file: file.to_string(),
                reply,
                downloaded_with: Mutex::new(None),
                reports: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CalibrationHub for MockHub {
        async fn download(&self, api_key: &str) -> Result<String, ServiceError> {
            *self.downloaded_with.lock().unwrap() = Some(api_key.to_string());
            Ok(self.file.clone())
        }

        async fn submit_report(&self, report: &CalibrationReport) -> Result<Value, ServiceError> {
            self.reports
                .lock()
                .unwrap()
                .push(serde_json::to_value(report).unwrap());
            Ok(self.reply.clone())
        }
    }

    const FILE: &str = r#"{
        "apikey": "%PUT-YOUR-API-KEY-HERE%",
        "description": "desc",
        "copyright": "Copyright (C) 2238 by BanAN Technologies Inc.",
        "test-data": [
            {"question": "12 + 30", "answer": 42},
            {"question": "97 + 34", "answer": 130},
            {"question": "53 + 44", "answer": 97, "test": {"q": "capital city of Poland", "a": "???"}}
        ]
    }"#;

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_full_calibration() {
        let gateway = Arc::new(ScriptedGateway::answering(
            r#"[{"q": "capital city of Poland", "a": "Warsaw"}]"#,
        ));
        let hub = Arc::new(MockHub::new(
            FILE,
            json!({"code": 0, "message": "{{FLG:CALIBRATED}}"}),
        ));
        let use_case = RunCalibrationUseCase::new(gateway.clone(), hub.clone());

        let outcome = use_case
            .execute(RunCalibrationInput::new("key-123"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(hub.downloaded_with.lock().unwrap().as_deref(), Some("key-123"));
        assert_eq!(outcome.corrected, 1);
        assert_eq!(outcome.answered, 1);
        assert_eq!(outcome.flag.as_deref(), Some("{{FLG:CALIBRATED}}"));

        let reports = hub.reports.lock().unwrap();
        let report = &reports[0];
        assert_eq!(report["task"], "JSON");
        assert_eq!(report["apikey"], "key-123");
        assert_eq!(report["answer"]["apikey"], "key-123");
        assert_eq!(report["answer"]["test-data"][1]["answer"], 131);
        assert_eq!(report["answer"]["test-data"][2]["test"]["a"], "Warsaw");

        let requests = gateway.requests();
        assert_eq!(
            requests[0].last_user_message(),
            Some(r#"["capital city of Poland"]"#)
        );
    }

    #[tokio::test]
    async fn test_no_open_questions_skips_model() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let hub = Arc::new(MockHub::new(
            r#"{"test-data": [{"question": "1 + 1", "answer": 2}]}"#,
            json!({"code": 0, "message": "ok"}),
        ));
        let use_case = RunCalibrationUseCase::new(gateway.clone(), hub);

        let outcome = use_case
            .execute(RunCalibrationInput::new("k"), &NoProgress)
            .await
            .unwrap();

        assert!(gateway.requests().is_empty());
        assert_eq!(outcome.answered, 0);
        assert!(outcome.flag.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_model_answer_fails() {
        let gateway = Arc::new(ScriptedGateway::answering("Warsaw, I think."));
        let hub = Arc::new(MockHub::new(FILE, json!({})));
        let use_case = RunCalibrationUseCase::new(gateway, hub.clone());

        let err = use_case
            .execute(RunCalibrationInput::new("k"), &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunCalibrationError::Domain(DomainError::InvalidAnswerList(_))
        ));
        assert!(hub.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_file_fails() {
        let hub = Arc::new(MockHub::new("<html>", json!({})));
        let use_case = RunCalibrationUseCase::new(Arc::new(ScriptedGateway::new(vec![])), hub);

        let err = use_case
            .execute(RunCalibrationInput::new("k"), &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunCalibrationError::Domain(DomainError::InvalidCalibrationData(_))
        ));
    }
}
