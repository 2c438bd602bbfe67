use serde::{Deserialize, Serialize};

use crate::domain::types::{ArtifactId, CategoryId, CategoryName, CategoryPath, CategoryPosition};

/// A node of the category hierarchy.
///
/// Relationships are stored as ids: `parent_id` points upwards, while
/// `subcategories` lists the children in position order and `artifacts` the
/// artifacts filed under this category. The owning
/// [`CategoryTree`](crate::domain::category_tree::CategoryTree) keeps these
/// fields consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub parent_id: Option<CategoryId>,
    pub position: CategoryPosition,
    pub path: CategoryPath,
    pub subcategories: Vec<CategoryId>,
    pub artifacts: Vec<ArtifactId>,
}

impl Category {
    /// A freshly persisted category that is not attached to any parent yet.
    pub fn detached(id: CategoryId, name: CategoryName) -> Self {
        Self {
            id,
            name,
            parent_id: None,
            position: CategoryPosition::default(),
            path: CategoryPath::root(id),
            subcategories: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    /// `true` when the category has neither subcategories nor artifacts.
    pub fn is_empty(&self) -> bool {
        self.subcategories.is_empty() && self.artifacts.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Depth in the tree, derived from the materialized path.
    pub fn level(&self) -> usize {
        self.path.level()
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub parent_id: Option<CategoryId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Category {
        Category::detached(
            CategoryId::new(3).unwrap(),
            CategoryName::new("Libraries").unwrap(),
        )
    }

    #[test]
    fn detached_category_is_an_empty_root() {
        let category = sample();
        assert!(category.is_root());
        assert!(category.is_empty());
        assert_eq!(category.path.as_str(), "3");
        assert_eq!(category.level(), 0);
    }

    #[test]
    fn empty_check_is_stable() {
        let mut category = sample();
        category.artifacts.push(ArtifactId::new(1).unwrap());

        let first = category.is_empty();
        let second = category.is_empty();
        assert!(!first);
        assert_eq!(first, second);
    }

    #[test]
    fn any_subcategory_makes_category_non_empty() {
        let mut category = sample();
        category.subcategories.push(CategoryId::new(4).unwrap());
        assert!(!category.is_empty());
    }
}
