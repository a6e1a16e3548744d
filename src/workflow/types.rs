use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::provider::types::{PrResult, TestPlan, TestResults, Ticket};
use crate::provider::{
    AnalyticsProvider, DocsProvider, TestFrameworkProvider, TicketProvider, VcsProvider,
};

/// Providers container for the workflow. Docs and analytics are optional;
/// the orchestrator skips their steps when the handle is absent.
#[derive(Clone)]
pub struct WorkflowProviders {
    pub ticket: Arc<dyn TicketProvider>,
    pub docs: Option<Arc<dyn DocsProvider>>,
    pub analytics: Option<Arc<dyn AnalyticsProvider>>,
    pub vcs: Arc<dyn VcsProvider>,
    pub test_framework: Arc<dyn TestFrameworkProvider>,
}

/// Per-invocation execution options.
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub ticket_id: String,
    /// Stop after code generation; no execution, healing, PR, or reporting.
    pub dry_run: bool,
    pub skip_pr: bool,
    /// Accepted for forward compatibility; no retry loop exists in the engine.
    pub max_retries: Option<u32>,
}

impl WorkflowOptions {
    pub fn new(ticket_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            dry_run: false,
            skip_pr: false,
            max_retries: None,
        }
    }
}

/// The eight logical workflow steps, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    AnalyzeTicket,
    SearchPatterns,
    GenerateTestPlan,
    GenerateCode,
    ExecuteTests,
    HealFailures,
    CreatePr,
    ReportResults,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::AnalyzeTicket => "analyze_ticket",
            WorkflowStep::SearchPatterns => "search_patterns",
            WorkflowStep::GenerateTestPlan => "generate_test_plan",
            WorkflowStep::GenerateCode => "generate_code",
            WorkflowStep::ExecuteTests => "execute_tests",
            WorkflowStep::HealFailures => "heal_failures",
            WorkflowStep::CreatePr => "create_pr",
            WorkflowStep::ReportResults => "report_results",
        }
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state threaded through the steps of one run. Each field is
/// written by exactly one step and never overwritten afterwards, so later
/// steps may rely on earlier steps' outputs once reached.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowContext {
    pub ticket_id: String,
    /// Set by `analyze_ticket`.
    pub ticket: Option<Ticket>,
    /// Set by `generate_test_plan`.
    pub test_plan: Option<TestPlan>,
    /// Set by `generate_code`.
    pub generated_code: Option<String>,
    /// Set by `execute_tests`.
    pub test_results: Option<TestResults>,
    /// Set by `create_pr`.
    pub pr_result: Option<PrResult>,
    /// Append-only; one entry per failed step.
    pub errors: Vec<WorkflowError>,
}

impl WorkflowContext {
    pub fn new(ticket_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            ticket: None,
            test_plan: None,
            generated_code: None,
            test_results: None,
            pr_result: None,
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowError {
    pub step: String,
    pub message: String,
    pub recoverable: bool,
    pub timestamp: DateTime<Utc>,
}

/// Record of one executed step, in execution order. Skipped steps record
/// nothing.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub step: WorkflowStep,
    pub success: bool,
    pub message: String,
    /// Milliseconds.
    pub duration: u64,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub success: bool,
    pub context: WorkflowContext,
    pub steps: Vec<StepResult>,
    /// Milliseconds, orchestrator entry to exit.
    pub total_duration: u64,
}
