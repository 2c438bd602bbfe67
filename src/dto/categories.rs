use std::collections::HashSet;

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::category_tree::CategoryTree;

/// JSON view of a category with its subtree expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub parent_category_id: Option<i32>,
    pub position: i32,
    pub path: String,
    pub level: usize,
    pub subcategories: Vec<CategoryDto>,
    pub artifacts_count: usize,
}

impl CategoryDto {
    /// Builds the view of `category`, descending through `tree` in position
    /// order.
    pub fn from_tree(tree: &CategoryTree, category: &Category) -> Self {
        Self::build(tree, category, &mut HashSet::new())
    }

    /// A category already on the current walk is rendered without children.
    fn build(tree: &CategoryTree, category: &Category, visited: &mut HashSet<i32>) -> Self {
        let first_visit = visited.insert(category.id.get());
        Self {
            id: category.id.get(),
            name: category.name.as_str().to_string(),
            parent_category_id: category.parent_id.map(|id| id.get()),
            position: category.position.get(),
            path: category.path.as_str().to_string(),
            level: category.level(),
            subcategories: if first_visit {
                tree.children(category.id)
                    .into_iter()
                    .map(|child| Self::build(tree, child, visited))
                    .collect()
            } else {
                Vec::new()
            },
            artifacts_count: category.artifacts.len(),
        }
    }

    /// Every root with its subtree, roots in position order.
    pub fn forest(tree: &CategoryTree) -> Vec<Self> {
        tree.roots()
            .into_iter()
            .map(|root| Self::from_tree(tree, root))
            .collect()
    }
}
