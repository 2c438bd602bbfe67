//! Serializable views returned by the HTTP API.

pub mod artifacts;
pub mod categories;
