use crate::provider::types::{TestPlan, TestStep, Ticket};

/// Normalized plan slug for a ticket id: lower-cased, every byte outside
/// `[a-z0-9]` replaced with a hyphen, prefixed with `test-`.
pub fn plan_slug(ticket_id: &str) -> String {
    let normalized: String = ticket_id
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("test-{normalized}")
}

/// Derive a test plan from an analyzed ticket. Each acceptance criterion
/// maps 1:1 to a "verify" step; tags mirror the ticket labels.
pub fn build_test_plan(ticket: &Ticket) -> TestPlan {
    TestPlan {
        name: plan_slug(&ticket.id),
        description: ticket.title.clone(),
        steps: ticket
            .acceptance_criteria
            .iter()
            .map(|criterion| TestStep {
                action: "verify".to_string(),
                selector: None,
                value: None,
                assertion: Some(criterion.clone()),
                screenshot: false,
            })
            .collect(),
        fixtures: Vec::new(),
        tags: ticket.labels.clone(),
    }
}
