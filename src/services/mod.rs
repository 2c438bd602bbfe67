pub use errors::{ServiceError, ServiceResult};

pub mod artifacts;
pub mod categories;
pub mod errors;
