use crate::domain::task::TaskId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Invalid column '{0}'. Valid columns: todo, doing, done")]
    InvalidColumn(String),

    #[error("Invalid sort key '{0}'. Valid keys: id, title, priority")]
    InvalidSortKey(String),

    #[error("Invalid board name: '{0}'")]
    InvalidBoardName(String),

    #[error("Invalid priority '{0}': must be 1, 2, or 3")]
    InvalidPriority(String),

    #[error("Invalid task ID: {0}")]
    InvalidTaskId(String),

    #[error("No saved board at {}", .0.display())]
    BoardNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
