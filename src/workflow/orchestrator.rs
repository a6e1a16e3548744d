use std::time::Instant;

use serde_json::{json, Value};

use crate::config::WorkflowConfig;
use crate::error::{AppError, Result};
use crate::provider::types::{ExecutionConfig, PrOptions};
use crate::workflow::healing::HealingPolicy;
use crate::workflow::plan;
use crate::workflow::pr;
use crate::workflow::runner::{StepAbort, StepRunner};
use crate::workflow::types::{
    WorkflowContext, WorkflowOptions, WorkflowProviders, WorkflowResult, WorkflowStep,
};

/// Coordinates the test automation workflow.
///
/// The step sequence:
/// 1. analyze_ticket - read the ticket and attach acceptance criteria
/// 2. search_patterns - query documentation (only with a docs provider)
/// 3. generate_test_plan - derive a structured plan from the criteria
/// 4. generate_code - generate test code from the plan
/// 5. execute_tests - run the generated tests (skipped on dry run)
/// 6. heal_failures - attempt to heal failing tests (only when some failed)
/// 7. create_pr - branch, commit, push, open the PR (skippable)
/// 8. report_results - forward results to analytics (only when configured)
pub struct WorkflowOrchestrator {
    providers: WorkflowProviders,
    config: WorkflowConfig,
}

impl WorkflowOrchestrator {
    pub fn new(providers: WorkflowProviders, config: WorkflowConfig) -> Self {
        Self { providers, config }
    }

    /// Execute the full workflow for one ticket.
    ///
    /// Always returns a `WorkflowResult`; a fatal step failure stops the
    /// remaining steps but the result still carries every step recorded up
    /// to the abort. `success` is true exactly when no step failed.
    pub async fn execute(&self, options: WorkflowOptions) -> WorkflowResult {
        let started = Instant::now();
        tracing::info!(
            ticket = %options.ticket_id,
            dry_run = options.dry_run,
            skip_pr = options.skip_pr,
            "Starting workflow"
        );

        let mut context = WorkflowContext::new(options.ticket_id.clone());
        let mut runner = StepRunner::new();

        if let Err(abort) = self.run_pipeline(&options, &mut context, &mut runner).await {
            // The step runner already recorded the error; just stop here.
            tracing::error!(step = %abort.step, error = %abort.message, "Workflow aborted");
        }

        WorkflowResult {
            success: context.errors.is_empty(),
            context,
            steps: runner.into_steps(),
            total_duration: started.elapsed().as_millis() as u64,
        }
    }

    async fn run_pipeline(
        &self,
        options: &WorkflowOptions,
        context: &mut WorkflowContext,
        runner: &mut StepRunner,
    ) -> std::result::Result<(), StepAbort> {
        // Step 1: Analyze ticket
        let started = Instant::now();
        let outcome = self.analyze_ticket(options, context).await;
        runner.finish(WorkflowStep::AnalyzeTicket, context, started, outcome)?;

        // Step 2: Search patterns (optional)
        if self.providers.docs.is_some() {
            let started = Instant::now();
            let outcome = self.search_patterns(context).await;
            runner.finish(WorkflowStep::SearchPatterns, context, started, outcome)?;
        }

        // Step 3: Generate test plan
        let started = Instant::now();
        let outcome = self.generate_test_plan(context).await;
        runner.finish(WorkflowStep::GenerateTestPlan, context, started, outcome)?;

        // Step 4: Generate code
        let started = Instant::now();
        let outcome = self.generate_code(context).await;
        runner.finish(WorkflowStep::GenerateCode, context, started, outcome)?;

        if options.dry_run {
            return Ok(());
        }

        // Step 5: Execute tests
        let started = Instant::now();
        let outcome = self.execute_tests(context).await;
        runner.finish(WorkflowStep::ExecuteTests, context, started, outcome)?;

        // Step 6: Heal failures (if any)
        let failed = context.test_results.as_ref().map_or(0, |r| r.failed);
        if failed > 0 {
            let started = Instant::now();
            let outcome = self.heal_failures(context).await;
            runner.finish(WorkflowStep::HealFailures, context, started, outcome)?;
        }

        // Step 7: Create PR (unless skipped)
        if !options.skip_pr {
            let started = Instant::now();
            let outcome = self.create_pr(context).await;
            runner.finish(WorkflowStep::CreatePr, context, started, outcome)?;
        }

        // Step 8: Report results (optional)
        if self.providers.analytics.is_some() && context.test_results.is_some() {
            let started = Instant::now();
            let outcome = self.report_results(context).await;
            runner.finish(WorkflowStep::ReportResults, context, started, outcome)?;
        }

        Ok(())
    }

    async fn analyze_ticket(
        &self,
        options: &WorkflowOptions,
        context: &mut WorkflowContext,
    ) -> Result<Value> {
        let mut ticket = self.providers.ticket.read(&options.ticket_id).await?;
        let criteria = self
            .providers
            .ticket
            .get_acceptance_criteria(&options.ticket_id)
            .await?;
        ticket.acceptance_criteria = criteria;

        let data = json!({
            "title": ticket.title,
            "criteria": ticket.acceptance_criteria.len(),
        });
        context.ticket = Some(ticket);
        Ok(data)
    }

    async fn search_patterns(&self, context: &WorkflowContext) -> Result<Value> {
        let docs = self
            .providers
            .docs
            .as_ref()
            .ok_or_else(|| AppError::Internal("docs provider not configured".to_string()))?;
        let ticket = context
            .ticket
            .as_ref()
            .ok_or_else(|| AppError::Internal("ticket not analyzed".to_string()))?;

        // Results are recorded for observability only; they are not threaded
        // into plan or code generation.
        let patterns = docs.search_patterns(&ticket.title).await?;
        Ok(json!({ "patterns_found": patterns.len() }))
    }

    async fn generate_test_plan(&self, context: &mut WorkflowContext) -> Result<Value> {
        let ticket = context
            .ticket
            .as_ref()
            .ok_or_else(|| AppError::Internal("ticket not analyzed".to_string()))?;

        let plan = plan::build_test_plan(ticket);
        let data = json!({ "name": plan.name.as_str(), "steps": plan.steps.len() });
        context.test_plan = Some(plan);
        Ok(data)
    }

    async fn generate_code(&self, context: &mut WorkflowContext) -> Result<Value> {
        let plan = context
            .test_plan
            .as_ref()
            .ok_or_else(|| AppError::Internal("test plan not generated".to_string()))?;

        let code = self.providers.test_framework.generate_test(plan).await?;
        let data = json!({ "code_length": code.len() });
        context.generated_code = Some(code);
        Ok(data)
    }

    async fn execute_tests(&self, context: &mut WorkflowContext) -> Result<Value> {
        let results = self
            .providers
            .test_framework
            .execute(&ExecutionConfig::default())
            .await?;

        let data = json!({ "passed": results.passed, "failed": results.failed });
        context.test_results = Some(results);
        Ok(data)
    }

    async fn heal_failures(&self, context: &WorkflowContext) -> Result<Value> {
        let results = context
            .test_results
            .as_ref()
            .ok_or_else(|| AppError::Internal("no test results to heal".to_string()))?;

        let policy = HealingPolicy::new(self.config.auto_healing_threshold);
        let mut healed = Vec::new();
        // Sequential, in failure order; the healed list preserves that order.
        for failure in &results.failures {
            let result = self.providers.test_framework.heal(failure).await?;
            if policy.accepts(&result) {
                healed.push(failure.test_name.clone());
            }
        }
        Ok(json!({ "healed_tests": healed }))
    }

    async fn create_pr(&self, context: &mut WorkflowContext) -> Result<Value> {
        let ticket = context
            .ticket
            .as_ref()
            .ok_or_else(|| AppError::Internal("ticket not analyzed".to_string()))?;

        let branch = pr::branch_name(&context.ticket_id);
        self.providers.vcs.create_branch(&branch, None).await?;
        // File selection is the adapter's concern; nothing is staged
        // explicitly here.
        self.providers
            .vcs
            .commit(&pr::commit_message(&context.ticket_id), &[])
            .await?;
        self.providers.vcs.push(Some(&branch)).await?;

        let pr_result = self
            .providers
            .vcs
            .create_pr(&PrOptions {
                title: pr::pr_title(&context.ticket_id, &ticket.title),
                body: pr::pr_body(context),
                branch: branch.clone(),
                base_branch: None,
                draft: false,
                labels: Vec::new(),
                reviewers: Vec::new(),
            })
            .await?;

        let url = pr_result.url.clone();
        let number = pr_result.number;
        context.pr_result = Some(pr_result);

        self.providers.ticket.link_pr(&context.ticket_id, &url).await?;
        Ok(json!({ "pr_url": url, "pr_number": number }))
    }

    async fn report_results(&self, context: &WorkflowContext) -> Result<Value> {
        let analytics = self
            .providers
            .analytics
            .as_ref()
            .ok_or_else(|| AppError::Internal("analytics provider not configured".to_string()))?;
        let results = context
            .test_results
            .as_ref()
            .ok_or_else(|| AppError::Internal("no test results to report".to_string()))?;

        analytics.report_results(results).await?;
        Ok(json!({ "reported": true }))
    }
}
