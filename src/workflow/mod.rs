pub mod healing;
pub mod orchestrator;
pub mod plan;
pub mod pr;
pub mod report;
pub mod runner;
pub mod types;

pub use orchestrator::WorkflowOrchestrator;
pub use types::{
    StepResult, WorkflowContext, WorkflowError, WorkflowOptions, WorkflowProviders,
    WorkflowResult, WorkflowStep,
};
