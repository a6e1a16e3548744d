pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

/// Ticket management system (Linear, Jira, GitHub Issues, ...).
#[async_trait]
pub trait TicketProvider: Send + Sync {
    /// Provider name for identification and logging.
    fn name(&self) -> &str;

    /// Read ticket details by id (e.g. "ENG-123").
    async fn read(&self, ticket_id: &str) -> Result<Ticket>;

    /// Update ticket status, labels, or add a comment.
    async fn update(&self, ticket_id: &str, update: &TicketUpdate) -> Result<()>;

    /// Link a pull request to the ticket.
    async fn link_pr(&self, ticket_id: &str, pr_url: &str) -> Result<()>;

    /// Extract acceptance criteria from the ticket description, in order.
    async fn get_acceptance_criteria(&self, ticket_id: &str) -> Result<Vec<String>>;
}

/// Documentation system (Quoth, Confluence, Notion, ...). Optional.
#[async_trait]
pub trait DocsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Search for patterns and documentation, ranked by relevance.
    async fn search_patterns(&self, query: &str) -> Result<Vec<PatternResult>>;

    /// Read full document content.
    async fn read_document(&self, doc_id: &str) -> Result<Document>;
}

/// Test analytics system (Exolar, DataDog, ...). Optional.
#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Classify a test failure.
    async fn classify_failure(&self, failure: &TestFailure) -> Result<Classification>;

    /// Report test execution results.
    async fn report_results(&self, results: &TestResults) -> Result<()>;

    /// Find similar failures in history.
    async fn find_similar_failures(&self, error: &str) -> Result<Vec<SimilarFailure>>;

    /// Get flakiness data for a test signature ("file:testName").
    async fn get_flakiness(&self, test_signature: &str) -> Result<FlakinessData>;
}

/// Version control system (GitHub, GitLab, Bitbucket, ...).
#[async_trait]
pub trait VcsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Create a new branch; `base` defaults to the repository default branch.
    async fn create_branch(&self, name: &str, base: Option<&str>) -> Result<()>;

    /// Commit the given files. An empty list leaves staging to the provider.
    async fn commit(&self, message: &str, files: &[String]) -> Result<()>;

    /// Push to remote; `branch` defaults to the current branch.
    async fn push(&self, branch: Option<&str>) -> Result<()>;

    /// Open a pull request.
    async fn create_pr(&self, options: &PrOptions) -> Result<PrResult>;

    /// Current branch name.
    async fn current_branch(&self) -> Result<String>;

    /// Whether there are uncommitted changes.
    async fn has_changes(&self) -> Result<bool>;
}

/// Test framework (Playwright, Vitest, Cypress, ...).
#[async_trait]
pub trait TestFrameworkProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Detect and return framework configuration.
    async fn detect(&self) -> Result<FrameworkConfig>;

    /// Generate test source code from a plan.
    async fn generate_test(&self, plan: &TestPlan) -> Result<String>;

    /// Execute tests with the given configuration.
    async fn execute(&self, config: &ExecutionConfig) -> Result<TestResults>;

    /// Attempt to heal a failing test.
    async fn heal(&self, failure: &TestFailure) -> Result<HealResult>;
}
