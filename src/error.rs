use thiserror::Error;

use crate::models::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskAssigningError {
    #[error("Expected user: {user} was not found in current working solution")]
    UserNotFound { user: String },
    #[error("Task {0} already exists in current working solution")]
    DuplicateTask(TaskId),
    #[error("Invalid priority: {0}, priority must be in the range [0, 10]")]
    InvalidPriority(i32),
    #[error("Chain invariant violation: {0}")]
    ChainInvariantViolation(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<config::ConfigError> for TaskAssigningError {
    fn from(error: config::ConfigError) -> Self {
        TaskAssigningError::ConfigurationError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskAssigningError>;
