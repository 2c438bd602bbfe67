//! Request bodies and query strings, validated before they reach services.

use std::borrow::Cow;

use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::types::TypeConstraintError;

pub mod artifacts;
pub mod categories;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

/// Flattens validator output into failures ordered by field name.
pub fn validation_failures(errors: &ValidationErrors) -> Vec<ValidationFailure> {
    let mut failures: Vec<ValidationFailure> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationFailure {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid")),
            })
        })
        .collect();
    failures.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    failures
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("form validation failed")]
    Validation(Vec<ValidationFailure>),
    #[error("form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(validation_failures(&value))
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Blank optional text is treated as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "b too short"))]
        b: String,
        #[validate(range(min = 1, message = "a too small"))]
        a: i32,
    }

    #[test]
    fn failures_are_ordered_by_field() {
        let errors = Sample {
            b: "x".into(),
            a: 0,
        }
        .validate()
        .unwrap_err();

        let failures = validation_failures(&errors);

        assert_eq!(
            failures,
            vec![
                ValidationFailure {
                    field: "a".into(),
                    message: "a too small".into(),
                },
                ValidationFailure {
                    field: "b".into(),
                    message: "b too short".into(),
                },
            ]
        );
    }
}
