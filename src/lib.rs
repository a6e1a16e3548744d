pub mod config;
pub mod error;
pub mod provider;
pub mod workflow;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use workflow::{WorkflowOptions, WorkflowOrchestrator, WorkflowProviders, WorkflowResult};
