//! Progress notification port
//!
//! Defines the interface for reporting progress while an exercise runs.

/// One step of an exercise's linear flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseStep {
    FetchQuestion,
    AskModel,
    Submit,
    Download,
    Repair,
    Report,
}

impl ExerciseStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseStep::FetchQuestion => "Fetching question",
            ExerciseStep::AskModel => "Asking the model",
            ExerciseStep::Submit => "Submitting answer",
            ExerciseStep::Download => "Downloading calibration file",
            ExerciseStep::Repair => "Repairing test data",
            ExerciseStep::Report => "Sending report",
        }
    }
}

/// Callback for progress updates during an exercise
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a step starts
    fn on_step_start(&self, step: ExerciseStep);

    /// Called when a step ends, successfully or not
    fn on_step_complete(&self, step: ExerciseStep, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_step_start(&self, _step: ExerciseStep) {}
    fn on_step_complete(&self, _step: ExerciseStep, _success: bool) {}
}
