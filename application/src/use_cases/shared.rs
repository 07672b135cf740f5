//! Shared utilities for use cases.
//!
//! Contains the step wrapper that drives progress callbacks and the traced
//! completion call used by every exercise.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{ExerciseStep, ProgressNotifier};
use crate::ports::trace_sink::{TraceEvent, TraceSink};
use course_domain::{CompletionRequest, LlmResponse};
use serde_json::json;
use std::future::Future;

/// Run one exercise step, reporting its start and outcome to `progress`.
pub(crate) async fn run_step<T, E, F>(
    progress: &dyn ProgressNotifier,
    step: ExerciseStep,
    fut: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    progress.on_step_start(step);
    let result = fut.await;
    progress.on_step_complete(step, result.is_ok());
    result
}

/// Send one completion request and record it as a `generation` event.
///
/// An empty answer is turned into [`GatewayError::EmptyResponse`] so callers
/// only ever see usable text.
pub(crate) async fn traced_completion(
    gateway: &dyn LlmGateway,
    sink: &dyn TraceSink,
    trace_id: &str,
    name: &str,
    request: &CompletionRequest,
) -> Result<LlmResponse, GatewayError> {
    let result = gateway.respond(request).await.and_then(|response| {
        if response.is_empty() {
            Err(GatewayError::EmptyResponse)
        } else {
            Ok(response)
        }
    });

    let payload = match &result {
        Ok(response) => json!({
            "name": name,
            "model": request.model.as_str(),
            "input": request.messages,
            "output": response.text,
            "usage": response.usage,
        }),
        Err(e) => json!({
            "name": name,
            "model": request.model.as_str(),
            "input": request.messages,
            "error": e.to_string(),
        }),
    };
    sink.record(TraceEvent::new(trace_id, "generation", payload));

    result
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted ports shared by the use case tests.

    use crate::ports::llm_gateway::{GatewayError, LlmGateway};
    use crate::ports::trace_sink::{TraceEvent, TraceSink};
    use async_trait::async_trait;
    use course_domain::{CompletionRequest, LlmResponse};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Gateway that replays canned answers and keeps every request it saw
    pub struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<LlmResponse, GatewayError>>>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedGateway {
        pub fn new(responses: Vec<Result<LlmResponse, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn answering(text: &str) -> Self {
            Self::new(vec![Ok(LlmResponse::new(text))])
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn respond(&self, request: &CompletionRequest) -> Result<LlmResponse, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    /// Sink that keeps every recorded event
    #[derive(Default)]
    pub struct MemorySink {
        pub events: Mutex<Vec<TraceEvent>>,
    }

    impl MemorySink {
        pub fn event_types(&self) -> Vec<&'static str> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.event_type)
                .collect()
        }
    }

    impl TraceSink for MemorySink {
        fn record(&self, event: TraceEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
