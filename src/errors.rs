use thiserror::Error;

use crate::config::ConfigError;
use crate::tools::ToolError;

/// Errors that abort a conversation turn
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Remote call failed: {0}")]
    RemoteCall(String),

    #[error("Response does not match the step schema: {0}")]
    SchemaValidation(String),

    #[error("Unrecognized step: {0}")]
    UnrecognizedStep(String),

    #[error("No OUTPUT step after {0} model calls")]
    StepLimitExceeded(usize),

    #[error("Tool execution failed: {0}")]
    ToolExecution(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

impl From<ConfigError> for AgentError {
    fn from(err: ConfigError) -> Self {
        AgentError::Configuration(err.to_string())
    }
}

impl From<ToolError> for AgentError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(name) => {
                AgentError::UnrecognizedStep(format!("TOOL step names unknown function '{}'", name))
            }
            other => AgentError::ToolExecution(other.to_string()),
        }
    }
}
