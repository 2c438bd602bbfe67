use thiserror::Error;

use crate::domain::error::DomainError;
use crate::forms::ValidationFailure;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted data could not be turned into domain values.
    #[error("{0}")]
    Form(String),
    /// Submitted data failed field validation.
    #[error("validation failed")]
    Validation(Vec<ValidationFailure>),
    /// The catalog rejected the requested change.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
