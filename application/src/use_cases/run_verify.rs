//! Run Verify use case (E02).
//!
//! Opens the robot verification conversation with `READY`, answers the
//! question it returns, and replies under the same `msgID` to obtain the
//! hidden phrase.

use crate::config::LlmParams;
use crate::ports::exercise_service::{ServiceError, VerifyChannel};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{ExerciseStep, ProgressNotifier};
use crate::ports::trace_sink::{NoTraceSink, TraceEvent, TraceSink};
use crate::use_cases::shared::{run_step, traced_completion};
use course_domain::{
    Answer, DomainError, PromptTemplate, Question, VerifyMessage, VerifyOutcome,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during the verification exercise.
#[derive(Error, Debug)]
pub enum RunVerifyError {
    #[error("Failed to initiate the conversation: {0}")]
    InitiateFailed(#[source] ServiceError),

    #[error("Failed to send the answer: {0}")]
    ReplyFailed(#[source] ServiceError),

    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the [`RunVerifyUseCase`].
#[derive(Debug, Clone)]
pub struct RunVerifyInput {
    pub params: LlmParams,
}

impl Default for RunVerifyInput {
    fn default() -> Self {
        Self {
            params: LlmParams::verify(),
        }
    }
}

impl RunVerifyInput {
    pub fn with_params(mut self, params: LlmParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for the robot verification exercise.
pub struct RunVerifyUseCase {
    gateway: Arc<dyn LlmGateway>,
    channel: Arc<dyn VerifyChannel>,
    trace_sink: Arc<dyn TraceSink>,
}

impl RunVerifyUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, channel: Arc<dyn VerifyChannel>) -> Self {
        Self {
            gateway,
            channel,
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
        input: RunVerifyInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<VerifyOutcome, RunVerifyError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        info!(trace_id = %trace_id, "Starting verification exercise");

        let received = run_step(progress, ExerciseStep::FetchQuestion, async {
            self.channel
                .exchange(&VerifyMessage::ready())
                .await
                .map_err(RunVerifyError::InitiateFailed)
        })
        .await?;
        info!(
            "Conversation initiated. Received msgID: {}, question: {}",
            received.msg_id, received.text
        );
        let question = Question::new(received.text.clone())?;
        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "trace",
            json!({ "name": "verify", "msg_id": received.msg_id, "input": question.content() }),
        ));

        let request = input.params.system_and_user(
            PromptTemplate::robot_verification_system(),
            question.content(),
        );
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
        info!("Received response from the model: {}", answer);

        let reply = VerifyMessage::reply_to(&received, &answer);
        let final_message = run_step(progress, ExerciseStep::Submit, async {
            self.channel
                .exchange(&reply)
                .await
                .map_err(RunVerifyError::ReplyFailed)
        })
        .await?;

        if final_message.text.is_empty() {
            warn!("Endpoint replied without a hidden phrase");
        } else {
            info!("Hidden phrase retrieved: {}", final_message.text);
        }
        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "trace_end",
            json!({ "msg_id": final_message.msg_id, "output": final_message.text }),
        ));

        Ok(VerifyOutcome {
            msg_id: received.msg_id,
            question,
            answer,
            hidden_phrase: final_message.text,
        })
    }
}
