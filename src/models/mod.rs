//! Diesel row types and their conversions into domain entities.

pub mod artifact;
pub mod artifact_version;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
