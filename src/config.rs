use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub test_framework: TestFrameworkConfig,
    pub tickets: TicketsConfig,
    #[serde(default)]
    pub documentation: Option<DocumentationConfig>,
    #[serde(default)]
    pub analytics: Option<AnalyticsConfig>,
    #[serde(default)]
    pub vcs: VcsConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TestFrameworkConfig {
    pub provider: TestFrameworkKind,
    #[serde(default)]
    pub config: Option<PathBuf>,
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,
    #[serde(default)]
    pub page_objects_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestFrameworkKind {
    Playwright,
    Vitest,
    Cypress,
    Custom,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TicketsConfig {
    pub provider: TicketsKind,
    /// Linear workspace slug.
    #[serde(default)]
    pub workspace: Option<String>,
    /// Jira project key.
    #[serde(default)]
    pub project_key: Option<String>,
    /// GitHub Issues owner/repo.
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TicketsKind {
    Linear,
    Jira,
    GithubIssues,
    Custom,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentationConfig {
    pub provider: DocumentationKind,
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentationKind {
    Quoth,
    Custom,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    pub provider: AnalyticsKind,
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsKind {
    Exolar,
    Datadog,
    Custom,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VcsConfig {
    #[serde(default = "default_vcs_provider")]
    pub provider: VcsKind,
    #[serde(default)]
    pub ci_system: Option<CiSystem>,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            provider: default_vcs_provider(),
            ci_system: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Github,
    Gitlab,
    Bitbucket,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CiSystem {
    GithubActions,
    GitlabCi,
    Jenkins,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowConfig {
    /// Accepted for forward compatibility; no retry loop exists in the engine.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Minimum heal confidence (0-100) for a failing test to count as healed.
    #[serde(default = "default_auto_healing_threshold")]
    pub auto_healing_threshold: f64,
    /// Accepted for forward compatibility; the engine runs a single agent.
    #[serde(default = "default_parallel_agents")]
    pub parallel_agents: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            auto_healing_threshold: default_auto_healing_threshold(),
            parallel_agents: default_parallel_agents(),
        }
    }
}

fn default_test_dir() -> PathBuf {
    PathBuf::from("./tests")
}

fn default_vcs_provider() -> VcsKind {
    VcsKind::Github
}

fn default_max_retries() -> u32 {
    3
}

fn default_auto_healing_threshold() -> f64 {
    70.0
}

fn default_parallel_agents() -> u32 {
    3
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            // Try default paths
            builder = builder.add_source(config::File::with_name("chrysalis").required(false));
        }

        // Environment variable overrides with CHRYSALIS_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("CHRYSALIS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Range checks the deserializer cannot express.
    pub fn validate(&self) -> Result<()> {
        let wf = &self.workflow;
        if wf.max_retries > 10 {
            return Err(AppError::Config(format!(
                "workflow.max_retries must be between 0 and 10, got {}",
                wf.max_retries
            )));
        }
        if !(0.0..=100.0).contains(&wf.auto_healing_threshold) {
            return Err(AppError::Config(format!(
                "workflow.auto_healing_threshold must be between 0 and 100, got {}",
                wf.auto_healing_threshold
            )));
        }
        if !(1..=10).contains(&wf.parallel_agents) {
            return Err(AppError::Config(format!(
                "workflow.parallel_agents must be between 1 and 10, got {}",
                wf.parallel_agents
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> AppConfig {
        AppConfig {
            test_framework: TestFrameworkConfig {
                provider: TestFrameworkKind::Playwright,
                config: None,
                test_dir: default_test_dir(),
                page_objects_dir: None,
            },
            tickets: TicketsConfig {
                provider: TicketsKind::Linear,
                workspace: Some("acme".to_string()),
                project_key: None,
                owner: None,
                repo: None,
            },
            documentation: None,
            analytics: None,
            vcs: VcsConfig::default(),
            workflow: WorkflowConfig::default(),
        }
    }

    #[test]
    fn workflow_defaults() {
        let wf = WorkflowConfig::default();
        assert_eq!(wf.max_retries, 3);
        assert_eq!(wf.auto_healing_threshold, 70.0);
        assert_eq!(wf.parallel_agents, 3);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        let mut cfg = minimal_config();
        cfg.workflow.auto_healing_threshold = 150.0;
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn validate_rejects_excessive_retries() {
        let mut cfg = minimal_config();
        cfg.workflow.max_retries = 11;
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn deserializes_from_toml() {
        let raw = r#"
            [test_framework]
            provider = "playwright"

            [tickets]
            provider = "github-issues"
            owner = "acme"
            repo = "storefront"

            [workflow]
            auto_healing_threshold = 85
        "#;
        let cfg: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(cfg.tickets.provider, TicketsKind::GithubIssues);
        assert_eq!(cfg.workflow.auto_healing_threshold, 85.0);
        // Unspecified sections fall back to defaults
        assert_eq!(cfg.vcs.provider, VcsKind::Github);
        assert_eq!(cfg.workflow.max_retries, 3);
    }
}
