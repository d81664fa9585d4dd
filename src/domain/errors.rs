use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Could not determine product category")]
    ClassificationFailed,
    #[error("Unknown shipping category: {0}")]
    UnknownCategory(String),
    #[error("Upstream service error: {0}")]
    Upstream(String),
    #[error("Upstream service unavailable: {0}")]
    Unavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
