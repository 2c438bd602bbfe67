//! Error conversion glue between layers.
//!
//! The domain layer must not depend on form or service error types, so the
//! conversions into [`ServiceError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        match val {
            FormError::Validation(failures) => ServiceError::Validation(failures),
            FormError::TypeConstraint(message) => ServiceError::Form(message),
        }
    }
}

impl ServiceError {
    /// Maps a repository failure, logging anything that is not the caller's
    /// fault.
    pub fn from_repository(action: &str, error: RepositoryError) -> Self {
        match error {
            RepositoryError::Domain(e) => ServiceError::Domain(e),
            RepositoryError::NotFound => ServiceError::NotFound,
            other => {
                log::error!("Failed to {action}: {other}");
                ServiceError::Internal
            }
        }
    }
}
