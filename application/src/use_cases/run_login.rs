//! Run Login use case (E01).
//!
//! Scrapes the question from the login page, asks the model for the year,
//! logs in with the answer and inspects the secret page for `{{...}}` flags.

use crate::config::LlmParams;
use crate::ports::exercise_service::{LoginPortal, PageArchive, ServiceError};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{ExerciseStep, ProgressNotifier};
use crate::ports::trace_sink::{NoTraceSink, TraceEvent, TraceSink};
use crate::use_cases::shared::{run_step, traced_completion};
use course_domain::login::{extract_flags, strip_question_label};
use course_domain::{
    Answer, DomainError, LoginCredentials, LoginOutcome, PromptTemplate, Question,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during the login exercise.
#[derive(Error, Debug)]
pub enum RunLoginError {
    #[error("Failed to fetch the question: {0}")]
    FetchFailed(#[source] ServiceError),

    #[error("Login failed: {0}")]
    LoginFailed(#[source] ServiceError),

    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the [`RunLoginUseCase`].
#[derive(Debug, Clone)]
pub struct RunLoginInput {
    pub credentials: LoginCredentials,
    pub params: LlmParams,
}

impl RunLoginInput {
    pub fn new(credentials: LoginCredentials) -> Self {
        Self {
            credentials,
            params: LlmParams::login(),
        }
    }

    pub fn with_params(mut self, params: LlmParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for the login exercise.
pub struct RunLoginUseCase {
    gateway: Arc<dyn LlmGateway>,
    portal: Arc<dyn LoginPortal>,
    archive: Arc<dyn PageArchive>,
    trace_sink: Arc<dyn TraceSink>,
}

impl RunLoginUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        portal: Arc<dyn LoginPortal>,
        archive: Arc<dyn PageArchive>,
    ) -> Self {
        Self {
            gateway,
            portal,
            archive,
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
        input: RunLoginInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<LoginOutcome, RunLoginError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        info!(trace_id = %trace_id, user = %input.credentials.username, "Starting login exercise");

        let raw = run_step(progress, ExerciseStep::FetchQuestion, async {
            self.portal
                .fetch_question_text()
                .await
                .map_err(RunLoginError::FetchFailed)
        })
        .await?;
        let question = Question::new(strip_question_label(&raw))?;
        info!("Question fetched: {}", question);
        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "trace",
            json!({ "name": "login", "input": question.content() }),
        ));

        let request = input
            .params
            .system_and_user(PromptTemplate::historian_system(), question.content());
        let response = run_step(progress, ExerciseStep::AskModel, async {
            traced_completion(
                self.gateway.as_ref(),
                self.trace_sink.as_ref(),
                &trace_id,
                "answer_question",
                &request,
            )
            .await
        })
        .await?;
        let answer = Answer::new(response.text)?;
        info!("Answer: {}", answer);

        let page = run_step(progress, ExerciseStep::Submit, async {
            self.portal
                .submit(&input.credentials, &answer)
                .await
                .map_err(RunLoginError::LoginFailed)
        })
        .await?;
        info!(url = %page.url, bytes = page.body.len(), "Login successful");

        let saved_page = match self.archive.save(&page).await {
            Ok(path) => {
                info!("Secret page saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Could not save secret page: {}", e);
                None
            }
        };

        let flags = extract_flags(&page.body);
        for flag in &flags {
            info!("Found content: {{{{ {} }}}}", flag);
        }
        if flags.is_empty() {
            warn!("No {{{{...}}}} content found on the secret page");
        }

        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "trace_end",
            json!({ "page_url": page.url, "flags": flags }),
        ));

        Ok(LoginOutcome {
            question,
            answer,
            page_url: page.url,
            saved_page,
            flags,
        })
    }
}
