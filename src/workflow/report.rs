use crate::workflow::types::WorkflowResult;

/// Render a markdown summary of a finished run, for CLI or ticket comments.
pub fn format_result(result: &WorkflowResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    if result.success {
        lines.push("## Test Automation Complete".to_string());
        lines.push(String::new());
        lines.push(format!("**Ticket:** {}", result.context.ticket_id));
        lines.push(format!("**Duration:** {}ms", result.total_duration));
    } else {
        lines.push("## Test Automation Failed".to_string());
        lines.push(String::new());
        lines.push("### Errors".to_string());
        for error in &result.context.errors {
            lines.push(format!("- **{}:** {}", error.step, error.message));
        }
    }

    lines.push(String::new());
    lines.push("### Workflow Steps".to_string());
    for step in &result.steps {
        let icon = if step.success { "✅" } else { "❌" };
        lines.push(format!("{icon} {} ({}ms)", step.step, step.duration));
    }

    if let Some(pr) = &result.context.pr_result {
        lines.push(String::new());
        lines.push("### Pull Request".to_string());
        lines.push(format!("[{}]({})", pr.url, pr.url));
    }

    if let Some(tr) = &result.context.test_results {
        lines.push(String::new());
        lines.push("### Test Results".to_string());
        lines.push(format!("- Passed: {}", tr.passed));
        lines.push(format!("- Failed: {}", tr.failed));
        lines.push(format!("- Skipped: {}", tr.skipped));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::types::{StepResult, WorkflowContext, WorkflowError, WorkflowStep};
    use chrono::Utc;

    fn step(step: WorkflowStep, success: bool) -> StepResult {
        StepResult {
            step,
            success,
            message: String::new(),
            duration: 12,
            data: None,
        }
    }

    #[test]
    fn successful_run_summary() {
        let result = WorkflowResult {
            success: true,
            context: WorkflowContext::new("ENG-123"),
            steps: vec![
                step(WorkflowStep::AnalyzeTicket, true),
                step(WorkflowStep::GenerateTestPlan, true),
            ],
            total_duration: 840,
        };

        let out = format_result(&result);
        assert!(out.starts_with("## Test Automation Complete"));
        assert!(out.contains("**Ticket:** ENG-123"));
        assert!(out.contains("✅ analyze_ticket (12ms)"));
        assert!(!out.contains("### Errors"));
    }

    #[test]
    fn failed_run_lists_errors() {
        let mut context = WorkflowContext::new("ENG-123");
        context.errors.push(WorkflowError {
            step: "analyze_ticket".to_string(),
            message: "ticket not found".to_string(),
            recoverable: false,
            timestamp: Utc::now(),
        });

        let result = WorkflowResult {
            success: false,
            context,
            steps: vec![step(WorkflowStep::AnalyzeTicket, false)],
            total_duration: 30,
        };

        let out = format_result(&result);
        assert!(out.starts_with("## Test Automation Failed"));
        assert!(out.contains("- **analyze_ticket:** ticket not found"));
        assert!(out.contains("❌ analyze_ticket (12ms)"));
    }
}
