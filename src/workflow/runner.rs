use std::time::Instant;

use chrono::Utc;

use crate::error::Result;
use crate::workflow::types::{StepResult, WorkflowContext, WorkflowError, WorkflowStep};

/// A fatal step failure. The step runner has already recorded the
/// WorkflowError and failed StepResult by the time this is returned, so the
/// orchestrator only has to stop the pipeline.
#[derive(Debug)]
pub struct StepAbort {
    pub step: WorkflowStep,
    pub message: String,
}

/// Whether the pipeline continues after this step fails. Fixed by step
/// identity, not by error content.
pub fn is_recoverable(step: WorkflowStep) -> bool {
    matches!(
        step,
        WorkflowStep::SearchPatterns | WorkflowStep::HealFailures | WorkflowStep::ReportResults
    )
}

/// Records the outcome of each executed step for one workflow run.
pub struct StepRunner {
    steps: Vec<StepResult>,
}

impl StepRunner {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a completed step.
    ///
    /// On success, appends a successful StepResult carrying the step's data
    /// payload. On failure, appends a WorkflowError to the context and a
    /// failed StepResult; returns `Err(StepAbort)` only when the step is not
    /// recoverable, which stops the pipeline.
    pub fn finish(
        &mut self,
        step: WorkflowStep,
        context: &mut WorkflowContext,
        started: Instant,
        outcome: Result<serde_json::Value>,
    ) -> std::result::Result<(), StepAbort> {
        let duration = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(data) => {
                tracing::info!(step = %step, duration_ms = duration, "Step completed");
                self.steps.push(StepResult {
                    step,
                    success: true,
                    message: format!("{step} completed"),
                    duration,
                    data: Some(data),
                });
                Ok(())
            }
            Err(err) => {
                let recoverable = is_recoverable(step);
                let message = err.to_string();

                context.errors.push(WorkflowError {
                    step: step.as_str().to_string(),
                    message: message.clone(),
                    recoverable,
                    timestamp: Utc::now(),
                });
                self.steps.push(StepResult {
                    step,
                    success: false,
                    message: message.clone(),
                    duration,
                    data: None,
                });

                if recoverable {
                    tracing::warn!(step = %step, error = %message, "Step failed, continuing");
                    Ok(())
                } else {
                    Err(StepAbort { step, message })
                }
            }
        }
    }

    pub fn into_steps(self) -> Vec<StepResult> {
        self.steps
    }
}

impl Default for StepRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    #[test]
    fn classification_table() {
        assert!(is_recoverable(WorkflowStep::SearchPatterns));
        assert!(is_recoverable(WorkflowStep::HealFailures));
        assert!(is_recoverable(WorkflowStep::ReportResults));
        assert!(!is_recoverable(WorkflowStep::AnalyzeTicket));
        assert!(!is_recoverable(WorkflowStep::GenerateTestPlan));
        assert!(!is_recoverable(WorkflowStep::GenerateCode));
        assert!(!is_recoverable(WorkflowStep::ExecuteTests));
        assert!(!is_recoverable(WorkflowStep::CreatePr));
    }

    #[test]
    fn success_records_payload_and_message() {
        let mut runner = StepRunner::new();
        let mut context = WorkflowContext::new("ENG-1");

        let res = runner.finish(
            WorkflowStep::AnalyzeTicket,
            &mut context,
            Instant::now(),
            Ok(json!({ "criteria": 3 })),
        );

        assert!(res.is_ok());
        assert!(context.errors.is_empty());
        let steps = runner.into_steps();
        assert_eq!(steps.len(), 1);
        assert!(steps[0].success);
        assert_eq!(steps[0].message, "analyze_ticket completed");
        assert_eq!(steps[0].data, Some(json!({ "criteria": 3 })));
    }

    #[test]
    fn fatal_failure_aborts_and_records_once() {
        let mut runner = StepRunner::new();
        let mut context = WorkflowContext::new("ENG-1");

        let res = runner.finish(
            WorkflowStep::ExecuteTests,
            &mut context,
            Instant::now(),
            Err(AppError::TestFramework("runner crashed".to_string())),
        );

        let abort = res.unwrap_err();
        assert_eq!(abort.step, WorkflowStep::ExecuteTests);
        assert_eq!(context.errors.len(), 1);
        assert!(!context.errors[0].recoverable);
        assert_eq!(context.errors[0].step, "execute_tests");

        let steps = runner.into_steps();
        assert_eq!(steps.len(), 1);
        assert!(!steps[0].success);
        assert!(steps[0].data.is_none());
    }

    #[test]
    fn recoverable_failure_continues() {
        let mut runner = StepRunner::new();
        let mut context = WorkflowContext::new("ENG-1");

        let res = runner.finish(
            WorkflowStep::SearchPatterns,
            &mut context,
            Instant::now(),
            Err(AppError::Docs("index unavailable".to_string())),
        );

        assert!(res.is_ok());
        assert_eq!(context.errors.len(), 1);
        assert!(context.errors[0].recoverable);
        assert!(!runner.into_steps()[0].success);
    }
}
