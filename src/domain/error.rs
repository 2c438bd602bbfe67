use thiserror::Error;

/// Failures raised by the category tree and artifact versioning operations.
///
/// All variants are local and permanent: the caller must correct the request
/// rather than retry it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing, malformed or unknown input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The tree structure does not allow the requested change.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// Requested sibling position lies outside `0..sibling_count`.
    #[error("position {position} is out of range for {sibling_count} siblings")]
    OutOfRange { position: i32, sibling_count: usize },
}

pub type DomainResult<T> = Result<T, DomainError>;
