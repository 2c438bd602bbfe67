use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::types::TypeConstraintError;

/// Failures of the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("entity not found")]
    NotFound,
    /// A stored row no longer satisfies the domain constraints.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// The category tree or an artifact rejected the requested change.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
