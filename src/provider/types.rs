use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work item driving one workflow run, as read from the ticket system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    /// Derived from the description by the ticket provider; not authoritative.
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Backlog,
    Todo,
    InProgress,
    InReview,
    Done,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Urgent,
    High,
    Medium,
    Low,
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub status: Option<TicketStatus>,
    pub labels: Option<Vec<String>>,
    pub comment: Option<String>,
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    pub path: String,
    pub category: String,
    pub tags: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// One ranked match from a documentation pattern search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternResult {
    pub id: String,
    pub title: String,
    pub relevance: f64,
    pub snippet: String,
    pub document_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestFailure {
    pub test_name: String,
    pub error: String,
    pub stack_trace: Option<String>,
    pub screenshot: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub category: FailureCategory,
    pub confidence: f64,
    pub suggestion: String,
    pub related_failures: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    ElementNotFound,
    Timeout,
    AssertionFailed,
    NetworkError,
    Authentication,
    DataMismatch,
    Flaky,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    pub test_suite: String,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    /// Total suite duration in milliseconds.
    pub duration: u64,
    pub failures: Vec<TestFailure>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarFailure {
    pub test_name: String,
    pub error: String,
    pub similarity: f64,
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlakinessData {
    pub test_signature: String,
    pub flakiness_score: f64,
    pub total_runs: u32,
    pub failed_runs: u32,
    pub last_failure: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrOptions {
    pub title: String,
    pub body: String,
    pub branch: String,
    pub base_branch: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub reviewers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrResult {
    pub url: String,
    pub number: u64,
    pub branch: String,
}

/// Detected test framework configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkConfig {
    pub name: String,
    pub config_path: String,
    pub test_dir: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPlan {
    pub name: String,
    pub description: String,
    pub steps: Vec<TestStep>,
    pub fixtures: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestStep {
    pub action: String,
    pub selector: Option<String>,
    pub value: Option<String>,
    pub assertion: Option<String>,
    #[serde(default)]
    pub screenshot: bool,
}

/// Test execution options; all fields optional, provider defaults apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionConfig {
    pub test_files: Option<Vec<String>>,
    pub grep: Option<String>,
    pub workers: Option<u32>,
    pub retries: Option<u32>,
    pub timeout: Option<u64>,
    pub headed: Option<bool>,
}

/// Outcome of one heal attempt against a failing test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealResult {
    pub success: bool,
    pub original_selector: String,
    pub new_selector: Option<String>,
    /// 0-100; compared against `workflow.auto_healing_threshold`.
    pub confidence: f64,
    pub explanation: String,
}
