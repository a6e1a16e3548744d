use crate::provider::types::HealResult;

/// Decides which heal attempts count as actual heals. A failing test is
/// healed only when the provider reports success and its confidence clears
/// the configured threshold.
#[derive(Debug, Clone, Copy)]
pub struct HealingPolicy {
    threshold: f64,
}

impl HealingPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn accepts(&self, result: &HealResult) -> bool {
        result.success && result.confidence >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heal(success: bool, confidence: f64) -> HealResult {
        HealResult {
            success,
            original_selector: "#checkout".to_string(),
            new_selector: Some("[data-testid=checkout]".to_string()),
            confidence,
            explanation: "selector drifted".to_string(),
        }
    }

    #[test]
    fn accepts_above_threshold_only() {
        let policy = HealingPolicy::new(70.0);
        assert!(policy.accepts(&heal(true, 80.0)));
        assert!(!policy.accepts(&heal(true, 60.0)));
    }

    #[test]
    fn threshold_is_inclusive() {
        let policy = HealingPolicy::new(70.0);
        assert!(policy.accepts(&heal(true, 70.0)));
    }

    #[test]
    fn unsuccessful_heal_never_accepted() {
        let policy = HealingPolicy::new(70.0);
        assert!(!policy.accepts(&heal(false, 95.0)));
    }
}
