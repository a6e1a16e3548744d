use crate::workflow::types::WorkflowContext;

pub fn branch_name(ticket_id: &str) -> String {
    format!("test/{}", ticket_id.to_lowercase())
}

pub fn commit_message(ticket_id: &str) -> String {
    format!("test({ticket_id}): add automated tests")
}

pub fn pr_title(ticket_id: &str, ticket_title: &str) -> String {
    format!("test({ticket_id}): {ticket_title}")
}

/// Render the PR body from the final context. Pure formatting; identical
/// contexts produce byte-identical output.
pub fn pr_body(context: &WorkflowContext) -> String {
    let test_summary = match &context.test_results {
        Some(results) => format!(
            "- Passed: {}\n- Failed: {}\n- Skipped: {}",
            results.passed, results.failed, results.skipped
        ),
        None => "Tests not executed (dry run)".to_string(),
    };

    let criteria = context
        .ticket
        .as_ref()
        .map(|t| t.acceptance_criteria.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|criterion| format!("- [ ] {criterion}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## Summary\nAutomated tests generated for ticket {}\n\n\
         ## Test Results\n{}\n\n\
         ## Acceptance Criteria Covered\n{}\n\n\
         ---\n*Automated by Chrysalis*",
        context.ticket_id, test_summary, criteria
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::types::{TestResults, Ticket, TicketPriority, TicketStatus};
    use chrono::Utc;
    use std::collections::HashMap;

    fn context_with_ticket() -> WorkflowContext {
        let mut context = WorkflowContext::new("ENG-123");
        context.ticket = Some(Ticket {
            id: "ENG-123".to_string(),
            title: "Checkout button does nothing".to_string(),
            description: String::new(),
            status: TicketStatus::InProgress,
            priority: TicketPriority::High,
            labels: vec![],
            assignee: None,
            acceptance_criteria: vec![
                "Clicking checkout opens the payment page".to_string(),
                "Cart contents survive the navigation".to_string(),
            ],
            metadata: HashMap::new(),
        });
        context
    }

    #[test]
    fn branch_and_title_formats() {
        assert_eq!(branch_name("ENG-123"), "test/eng-123");
        assert_eq!(commit_message("ENG-123"), "test(ENG-123): add automated tests");
        assert_eq!(
            pr_title("ENG-123", "Checkout button does nothing"),
            "test(ENG-123): Checkout button does nothing"
        );
    }

    #[test]
    fn body_without_results_marks_dry_run() {
        let context = context_with_ticket();
        let body = pr_body(&context);
        assert!(body.contains("Tests not executed (dry run)"));
        assert!(body.contains("- [ ] Clicking checkout opens the payment page"));
    }

    #[test]
    fn body_with_results_lists_counts() {
        let mut context = context_with_ticket();
        context.test_results = Some(TestResults {
            test_suite: "test-eng-123".to_string(),
            passed: 5,
            failed: 1,
            skipped: 0,
            duration: 4200,
            failures: vec![],
            timestamp: Utc::now(),
        });

        let body = pr_body(&context);
        assert!(body.contains("- Passed: 5"));
        assert!(body.contains("- Failed: 1"));
        assert!(body.contains("- Skipped: 0"));
    }

    #[test]
    fn body_is_reproducible() {
        let context = context_with_ticket();
        assert_eq!(pr_body(&context), pr_body(&context));

        let expected = "## Summary\n\
            Automated tests generated for ticket ENG-123\n\
            \n\
            ## Test Results\n\
            Tests not executed (dry run)\n\
            \n\
            ## Acceptance Criteria Covered\n\
            - [ ] Clicking checkout opens the payment page\n\
            - [ ] Cart contents survive the navigation\n\
            \n\
            ---\n\
            *Automated by Chrysalis*";
        assert_eq!(pr_body(&context), expected);
    }
}
