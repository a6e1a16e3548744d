use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ticket provider error: {0}")]
    Ticket(String),

    #[error("Documentation provider error: {0}")]
    Docs(String),

    #[error("Test framework error: {0}")]
    TestFramework(String),

    #[error("VCS provider error: {0}")]
    Vcs(String),

    #[error("Analytics provider error: {0}")]
    Analytics(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
