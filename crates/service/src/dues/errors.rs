use thiserror::Error;

/// Business errors for dues workflows
#[derive(Debug, Error)]
pub enum DuesError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("repository error: {0}")]
    Repository(String),
}
