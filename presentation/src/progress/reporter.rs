//! Progress reporting for exercise execution

use colored::Colorize;
use course_application::ports::progress::{ExerciseStep, ProgressNotifier};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per running step
pub struct StepReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl StepReporter {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for StepReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for StepReporter {
    fn on_step_start(&self, step: ExerciseStep) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("{}...", step.as_str()));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut current) = self.current.lock()
            && let Some(previous) = current.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_step_complete(&self, step: ExerciseStep, success: bool) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        if let Some(pb) = current.take() {
            let mark = if success { "v".green() } else { "x".red() };
            pb.finish_with_message(format!("{} {}", mark, step.as_str()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_step_start(&self, step: ExerciseStep) {
        eprintln!("{} {}", "->".cyan(), step.as_str().bold());
    }

    fn on_step_complete(&self, step: ExerciseStep, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), step.as_str());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), step.as_str());
        }
    }
}
