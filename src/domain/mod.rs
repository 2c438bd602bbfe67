//! Domain entities and the pure logic that maintains their invariants.

pub mod artifact;
pub mod category;
pub mod category_tree;
pub mod error;
pub mod types;
pub mod version;
