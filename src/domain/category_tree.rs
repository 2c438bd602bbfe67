//! Arena of categories keyed by id.
//!
//! The tree owns every [`Category`] of a snapshot and is the only place that
//! changes parent links, sibling positions and materialized paths. Sibling
//! positions always form a dense `0..n` sequence, for children of a parent as
//! well as for the roots, and every path equals the parent's path followed by
//! the category's own id.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::domain::category::Category;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::types::{ArtifactId, CategoryId, CategoryName, CategoryPath, CategoryPosition};

/// A broken structural invariant found by [`CategoryTree::check_invariants`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("siblings under {parent:?} do not have dense positions")]
    SparsePositions { parent: Option<CategoryId> },
    #[error("category {child} is listed under {listed_under:?} but points to another parent")]
    MisplacedChild {
        child: CategoryId,
        listed_under: Option<CategoryId>,
    },
    #[error("category {id} references missing parent {parent}")]
    DanglingParent { id: CategoryId, parent: CategoryId },
    #[error("category {id} has path {actual}, expected {expected}")]
    StalePath {
        id: CategoryId,
        expected: String,
        actual: String,
    },
    #[error("category {0} is not reachable from any root")]
    Unreachable(CategoryId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTree {
    nodes: HashMap<CategoryId, Category>,
    roots: Vec<CategoryId>,
}

fn unknown(id: CategoryId) -> DomainError {
    DomainError::InvalidArgument(format!("unknown category {id}"))
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a tree from persisted categories.
    ///
    /// Child lists are derived from `parent_id` and ordered by the stored
    /// position (ties broken by id); stored positions and paths are taken as
    /// they are, so a damaged snapshot shows up in [`Self::check_invariants`].
    pub fn from_categories<I>(categories: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = Category>,
    {
        let mut nodes = HashMap::new();
        for mut category in categories {
            category.subcategories.clear();
            category.artifacts.clear();
            let id = category.id;
            if nodes.insert(id, category).is_some() {
                return Err(DomainError::InvalidArgument(format!(
                    "duplicate category {id}"
                )));
            }
        }

        let mut roots = Vec::new();
        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
        for category in nodes.values() {
            match category.parent_id {
                None => roots.push(category.id),
                Some(parent) if nodes.contains_key(&parent) => {
                    children.entry(parent).or_default().push(category.id)
                }
                Some(parent) => {
                    return Err(DomainError::InvalidArgument(format!(
                        "category {} references unknown parent {parent}",
                        category.id
                    )));
                }
            }
        }

        let mut tree = Self { nodes, roots };
        tree.roots = tree.ordered_by_position(&tree.roots);
        for (parent, ids) in children {
            let ordered = tree.ordered_by_position(&ids);
            if let Some(node) = tree.nodes.get_mut(&parent) {
                node.subcategories = ordered;
            }
        }
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All categories in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.nodes.values()
    }

    /// Root categories in position order.
    pub fn roots(&self) -> Vec<&Category> {
        self.roots.iter().filter_map(|id| self.nodes.get(id)).collect()
    }

    /// Direct children of `id` in position order.
    pub fn children(&self, id: CategoryId) -> Vec<&Category> {
        self.nodes
            .get(&id)
            .map(|category| {
                category
                    .subcategories
                    .iter()
                    .filter_map(|child| self.nodes.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Deletion guard: no subcategories and no artifacts.
    pub fn category_is_empty(&self, id: CategoryId) -> DomainResult<bool> {
        self.nodes
            .get(&id)
            .map(Category::is_empty)
            .ok_or_else(|| unknown(id))
    }

    /// Attaches a detached category as the last root.
    pub fn add_root(&mut self, mut category: Category) -> DomainResult<&Category> {
        self.ensure_detached(&category)?;

        category.parent_id = None;
        category.position = CategoryPosition::from_index(self.roots.len());
        category.path = CategoryPath::root(category.id);

        let id = category.id;
        self.roots.push(id);
        Ok(&*self.nodes.entry(id).or_insert(category))
    }

    /// Appends a detached category to the end of `parent_id`'s children.
    pub fn add_subcategory(
        &mut self,
        parent_id: CategoryId,
        mut category: Category,
    ) -> DomainResult<&Category> {
        self.ensure_detached(&category)?;
        let parent = self
            .nodes
            .get_mut(&parent_id)
            .ok_or_else(|| unknown(parent_id))?;

        category.parent_id = Some(parent_id);
        category.position = CategoryPosition::from_index(parent.subcategories.len());
        category.path = CategoryPath::child(&parent.path, category.id);
        parent.subcategories.push(category.id);

        let id = category.id;
        Ok(&*self.nodes.entry(id).or_insert(category))
    }

    /// Renames a category and refreshes the paths of its whole subtree.
    pub fn modify_category(&mut self, id: CategoryId, name: &str) -> DomainResult<()> {
        let name =
            CategoryName::new(name).map_err(|e| DomainError::InvalidArgument(e.to_string()))?;
        let category = self.nodes.get_mut(&id).ok_or_else(|| unknown(id))?;
        category.name = name;

        // Paths only depend on ids, the refresh keeps the subtree consistent
        // regardless.
        self.refresh_paths(id);
        Ok(())
    }

    /// Moves a category to `new_position` among its siblings.
    pub fn rearrange(&mut self, id: CategoryId, new_position: i32) -> DomainResult<()> {
        let category = self.nodes.get(&id).ok_or_else(|| unknown(id))?;
        let parent_id = category.parent_id.ok_or_else(|| {
            DomainError::InvalidOperation("cannot rearrange root category".to_string())
        })?;
        let parent = self.nodes.get(&parent_id).ok_or_else(|| unknown(parent_id))?;

        let mut siblings = self.ordered_by_position(&parent.subcategories);
        if !siblings.contains(&id) {
            return Err(DomainError::InvalidArgument(format!(
                "category {id} is not listed under {parent_id}"
            )));
        }
        let index = usize::try_from(new_position)
            .ok()
            .filter(|index| *index < siblings.len())
            .ok_or(DomainError::OutOfRange {
                position: new_position,
                sibling_count: siblings.len(),
            })?;

        siblings.retain(|sibling| *sibling != id);
        siblings.insert(index, id);
        self.assign_positions(Some(parent_id), siblings);
        Ok(())
    }

    /// Removes an empty child of `parent_id` and closes the position gap.
    pub fn delete_subcategory(
        &mut self,
        parent_id: CategoryId,
        child_id: CategoryId,
    ) -> DomainResult<Category> {
        let parent = self.nodes.get(&parent_id).ok_or_else(|| unknown(parent_id))?;
        if !parent.subcategories.contains(&child_id) {
            return Err(DomainError::InvalidArgument(format!(
                "category {child_id} is not a subcategory of {parent_id}"
            )));
        }
        self.ensure_deletable(child_id)?;

        let remaining: Vec<CategoryId> = self
            .ordered_by_position(&parent.subcategories)
            .into_iter()
            .filter(|id| *id != child_id)
            .collect();
        let removed = self.nodes.remove(&child_id).ok_or_else(|| unknown(child_id))?;
        self.assign_positions(Some(parent_id), remaining);
        Ok(removed)
    }

    /// Removes an empty category wherever it sits in the tree.
    pub fn delete_category(&mut self, id: CategoryId) -> DomainResult<Category> {
        let category = self.nodes.get(&id).ok_or_else(|| unknown(id))?;
        if let Some(parent_id) = category.parent_id {
            return self.delete_subcategory(parent_id, id);
        }
        self.ensure_deletable(id)?;

        let remaining: Vec<CategoryId> = self
            .ordered_by_position(&self.roots)
            .into_iter()
            .filter(|root| *root != id)
            .collect();
        let removed = self.nodes.remove(&id).ok_or_else(|| unknown(id))?;
        self.assign_positions(None, remaining);
        Ok(removed)
    }

    /// Records that `artifact_id` is filed under `category_id`.
    pub fn link_artifact(
        &mut self,
        category_id: CategoryId,
        artifact_id: ArtifactId,
    ) -> DomainResult<()> {
        let category = self
            .nodes
            .get_mut(&category_id)
            .ok_or_else(|| unknown(category_id))?;
        if !category.artifacts.contains(&artifact_id) {
            category.artifacts.push(artifact_id);
        }
        Ok(())
    }

    /// Drops an artifact reference; returns whether it was present.
    pub fn unlink_artifact(&mut self, category_id: CategoryId, artifact_id: ArtifactId) -> bool {
        match self.nodes.get_mut(&category_id) {
            Some(category) => {
                let before = category.artifacts.len();
                category.artifacts.retain(|id| *id != artifact_id);
                category.artifacts.len() != before
            }
            None => false,
        }
    }

    /// Lists every violated structural invariant, in id order.
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        let mut sibling_sets: Vec<(Option<CategoryId>, &[CategoryId])> =
            vec![(None, self.roots.as_slice())];
        let mut ids: Vec<CategoryId> = self.nodes.keys().copied().collect();
        ids.sort();
        for id in &ids {
            if let Some(category) = self.nodes.get(id) {
                sibling_sets.push((Some(*id), category.subcategories.as_slice()));
            }
        }

        for (parent, siblings) in sibling_sets {
            let mut dense = true;
            for (index, child) in siblings.iter().enumerate() {
                match self.nodes.get(child) {
                    Some(category) => {
                        if category.position != CategoryPosition::from_index(index) {
                            dense = false;
                        }
                        if category.parent_id != parent {
                            violations.push(InvariantViolation::MisplacedChild {
                                child: *child,
                                listed_under: parent,
                            });
                        }
                    }
                    None => dense = false,
                }
            }
            if !dense {
                violations.push(InvariantViolation::SparsePositions { parent });
            }
        }

        for id in &ids {
            let Some(category) = self.nodes.get(id) else {
                continue;
            };
            let expected = match category.parent_id {
                None => Some(CategoryPath::root(*id)),
                Some(parent) => match self.nodes.get(&parent) {
                    Some(parent) => Some(CategoryPath::child(&parent.path, *id)),
                    None => {
                        violations.push(InvariantViolation::DanglingParent { id: *id, parent });
                        None
                    }
                },
            };
            if let Some(expected) = expected.filter(|expected| *expected != category.path) {
                violations.push(InvariantViolation::StalePath {
                    id: *id,
                    expected: expected.to_string(),
                    actual: category.path.to_string(),
                });
            }
        }

        let mut reachable = HashSet::new();
        let mut pending: Vec<CategoryId> = self.roots.clone();
        while let Some(id) = pending.pop() {
            if !reachable.insert(id) {
                continue;
            }
            if let Some(category) = self.nodes.get(&id) {
                pending.extend(category.subcategories.iter().copied());
            }
        }
        violations.extend(
            ids.iter()
                .filter(|id| !reachable.contains(*id))
                .map(|id| InvariantViolation::Unreachable(*id)),
        );

        violations
    }

    fn ensure_detached(&self, category: &Category) -> DomainResult<()> {
        if self.nodes.contains_key(&category.id) {
            return Err(DomainError::InvalidArgument(format!(
                "category {} is already attached",
                category.id
            )));
        }
        if !category.subcategories.is_empty() {
            return Err(DomainError::InvalidArgument(format!(
                "category {} must not carry subcategories when attached",
                category.id
            )));
        }
        Ok(())
    }

    fn ensure_deletable(&self, id: CategoryId) -> DomainResult<()> {
        if self.category_is_empty(id)? {
            Ok(())
        } else {
            Err(DomainError::InvalidOperation(
                "cannot delete non-empty category".to_string(),
            ))
        }
    }

    /// Copy of `ids` sorted by current position, ties broken by id.
    fn ordered_by_position(&self, ids: &[CategoryId]) -> Vec<CategoryId> {
        let mut ordered = ids.to_vec();
        ordered.sort_by_key(|id| {
            let position = self.nodes.get(id).map(|c| c.position);
            (position, *id)
        });
        ordered
    }

    /// Sets `position = index` along `ordered` and stores it as the sibling list.
    fn assign_positions(&mut self, parent: Option<CategoryId>, ordered: Vec<CategoryId>) {
        for (index, id) in ordered.iter().enumerate() {
            if let Some(category) = self.nodes.get_mut(id) {
                category.position = CategoryPosition::from_index(index);
            }
        }
        match parent {
            Some(parent) => {
                if let Some(category) = self.nodes.get_mut(&parent) {
                    category.subcategories = ordered;
                }
            }
            None => self.roots = ordered,
        }
    }

    /// Recomputes the path of `id` and then of every descendant, parents first.
    ///
    /// Each node is visited once, so a parent cycle in a damaged snapshot
    /// cannot keep the traversal going.
    fn refresh_paths(&mut self, id: CategoryId) {
        let mut visited = HashSet::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            let parent_path = self
                .nodes
                .get(&current)
                .and_then(|category| category.parent_id)
                .and_then(|parent| self.nodes.get(&parent))
                .map(|parent| parent.path.clone());
            if let Some(category) = self.nodes.get_mut(&current) {
                category.path = match parent_path {
                    Some(parent_path) => CategoryPath::child(&parent_path, current),
                    None => CategoryPath::root(current),
                };
                pending.extend(category.subcategories.iter().copied());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i32) -> CategoryId {
        CategoryId::new(value).unwrap()
    }

    fn node(value: i32, name: &str) -> Category {
        Category::detached(id(value), CategoryName::new(name).unwrap())
    }

    /// Root 1 with children A=2, B=3, C=4, D=5.
    fn four_siblings() -> CategoryTree {
        let mut tree = CategoryTree::new();
        tree.add_root(node(1, "Root")).unwrap();
        for (value, name) in [(2, "A"), (3, "B"), (4, "C"), (5, "D")] {
            tree.add_subcategory(id(1), node(value, name)).unwrap();
        }
        tree
    }

    fn order(tree: &CategoryTree, parent: i32) -> Vec<(String, i32)> {
        tree.children(id(parent))
            .into_iter()
            .map(|c| (c.name.to_string(), c.position.get()))
            .collect()
    }

    fn positions(tree: &CategoryTree, parent: i32) -> Vec<i32> {
        let mut values: Vec<i32> = tree
            .iter()
            .filter(|c| c.parent_id == Some(id(parent)))
            .map(|c| c.position.get())
            .collect();
        values.sort();
        values
    }

    #[test]
    fn add_subcategory_appends_and_materializes_path() {
        let mut tree = CategoryTree::new();
        tree.add_root(node(1, "Root")).unwrap();
        tree.add_subcategory(id(1), node(7, "First")).unwrap();
        let added = tree.add_subcategory(id(1), node(8, "Second")).unwrap();

        assert_eq!(added.parent_id, Some(id(1)));
        assert_eq!(added.position, 1);
        assert_eq!(added.path.as_str(), "1/8");
        assert_eq!(added.level(), 1);
        assert_eq!(tree.get(id(1)).unwrap().subcategories, vec![id(7), id(8)]);
    }

    #[test]
    fn nested_paths_follow_the_ancestor_chain() {
        let mut tree = CategoryTree::new();
        tree.add_root(node(1, "Root")).unwrap();
        tree.add_subcategory(id(1), node(2, "Rust")).unwrap();
        let leaf = tree.add_subcategory(id(2), node(3, "Async")).unwrap();

        assert_eq!(leaf.path.as_str(), "1/2/3");
        assert_eq!(leaf.level(), 2);
    }

    #[test]
    fn add_subcategory_rejects_unknown_parent_and_duplicates() {
        let mut tree = four_siblings();
        let before = tree.clone();

        let err = tree.add_subcategory(id(99), node(6, "Orphan")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));

        let err = tree.add_subcategory(id(1), node(3, "Again")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(tree, before);
    }

    #[test]
    fn roots_keep_dense_positions() {
        let mut tree = CategoryTree::new();
        for value in 1..=3 {
            let root = tree.add_root(node(value, "Root")).unwrap();
            assert_eq!(root.path, CategoryPath::root(id(value)));
        }
        tree.delete_category(id(2)).unwrap();

        let roots: Vec<(i32, i32)> = tree
            .roots()
            .into_iter()
            .map(|c| (c.id.get(), c.position.get()))
            .collect();
        assert_eq!(roots, vec![(1, 0), (3, 1)]);
        assert!(tree.check_invariants().is_empty());
    }

    #[test]
    fn rearrange_moves_category_to_front() {
        let mut tree = four_siblings();

        tree.rearrange(id(4), 0).unwrap();

        assert_eq!(
            order(&tree, 1),
            vec![
                ("C".to_string(), 0),
                ("A".to_string(), 1),
                ("B".to_string(), 2),
                ("D".to_string(), 3)
            ]
        );
    }

    #[test]
    fn rearrange_moves_category_towards_the_end() {
        let mut tree = four_siblings();

        tree.rearrange(id(2), 2).unwrap();

        let names: Vec<String> = order(&tree, 1).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "C", "A", "D"]);
        assert_eq!(positions(&tree, 1), vec![0, 1, 2, 3]);
    }

    #[test]
    fn rearrange_to_current_position_is_a_no_op() {
        let mut tree = four_siblings();
        let before = tree.clone();

        tree.rearrange(id(3), 1).unwrap();

        assert_eq!(tree, before);
    }

    #[test]
    fn rearrange_rejects_positions_outside_sibling_range() {
        let mut tree = four_siblings();
        let before = tree.clone();

        assert_eq!(
            tree.rearrange(id(3), -1).unwrap_err(),
            DomainError::OutOfRange {
                position: -1,
                sibling_count: 4
            }
        );
        assert_eq!(
            tree.rearrange(id(3), 4).unwrap_err(),
            DomainError::OutOfRange {
                position: 4,
                sibling_count: 4
            }
        );
        assert_eq!(tree, before);
    }

    #[test]
    fn rearrange_rejects_root_categories() {
        let mut tree = four_siblings();

        let err = tree.rearrange(id(1), 0).unwrap_err();

        assert!(matches!(err, DomainError::InvalidOperation(_)));
    }

    #[test]
    fn delete_reindexes_remaining_siblings() {
        let mut tree = CategoryTree::new();
        tree.add_root(node(1, "Root")).unwrap();
        for (value, name) in [(2, "A"), (3, "B"), (4, "C")] {
            tree.add_subcategory(id(1), node(value, name)).unwrap();
        }

        let removed = tree.delete_subcategory(id(1), id(3)).unwrap();

        assert_eq!(removed.name, "B");
        assert!(!tree.contains(id(3)));
        assert_eq!(
            order(&tree, 1),
            vec![("A".to_string(), 0), ("C".to_string(), 1)]
        );
    }

    #[test]
    fn delete_guard_rejects_category_with_subcategories() {
        let mut tree = four_siblings();
        tree.add_subcategory(id(3), node(9, "Nested")).unwrap();
        let before = tree.clone();

        assert_eq!(tree.category_is_empty(id(3)), Ok(false));
        let err = tree.delete_subcategory(id(1), id(3)).unwrap_err();

        assert_eq!(
            err,
            DomainError::InvalidOperation("cannot delete non-empty category".to_string())
        );
        assert_eq!(tree, before);
    }

    #[test]
    fn delete_guard_rejects_category_with_artifacts() {
        let mut tree = four_siblings();
        tree.link_artifact(id(2), ArtifactId::new(11).unwrap()).unwrap();
        let before = tree.clone();

        let err = tree.delete_category(id(2)).unwrap_err();

        assert!(matches!(err, DomainError::InvalidOperation(_)));
        assert_eq!(tree, before);

        assert!(tree.unlink_artifact(id(2), ArtifactId::new(11).unwrap()));
        tree.delete_category(id(2)).unwrap();
        assert_eq!(positions(&tree, 1), vec![0, 1, 2]);
    }

    #[test]
    fn delete_subcategory_requires_matching_parent() {
        let mut tree = four_siblings();
        tree.add_subcategory(id(2), node(9, "Nested")).unwrap();

        let err = tree.delete_subcategory(id(3), id(9)).unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert!(tree.contains(id(9)));
    }

    #[test]
    fn empty_check_is_idempotent() {
        let mut tree = four_siblings();
        tree.link_artifact(id(5), ArtifactId::new(1).unwrap()).unwrap();

        for category in [1, 2, 5] {
            let first = tree.category_is_empty(id(category)).unwrap();
            let second = tree.category_is_empty(id(category)).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(tree.category_is_empty(id(2)), Ok(true));
    }

    #[test]
    fn modify_category_renames_and_refreshes_descendant_paths() {
        let mut tree = CategoryTree::new();
        tree.add_root(node(1, "Root")).unwrap();
        tree.add_subcategory(id(1), node(2, "Rust")).unwrap();
        tree.add_subcategory(id(2), node(3, "Async")).unwrap();
        tree.add_subcategory(id(3), node(4, "Runtimes")).unwrap();
        tree.nodes.get_mut(&id(4)).unwrap().path = CategoryPath::root(id(4));

        tree.modify_category(id(2), "  Rust crates ").unwrap();

        assert_eq!(tree.get(id(2)).unwrap().name, "Rust crates");
        assert_eq!(tree.get(id(2)).unwrap().path.as_str(), "1/2");
        assert_eq!(tree.get(id(4)).unwrap().path.as_str(), "1/2/3/4");
        assert!(tree.check_invariants().is_empty());
    }

    #[test]
    fn modify_category_rejects_blank_names() {
        let mut tree = four_siblings();
        let before = tree.clone();

        for name in ["", "   "] {
            let err = tree.modify_category(id(2), name).unwrap_err();
            assert!(matches!(err, DomainError::InvalidArgument(_)));
        }
        assert_eq!(tree, before);
    }

    #[test]
    fn positions_stay_dense_across_mixed_operations() {
        let mut tree = CategoryTree::new();
        tree.add_root(node(1, "Root")).unwrap();
        for value in 2..=8 {
            tree.add_subcategory(id(1), node(value, "Child")).unwrap();
        }

        tree.rearrange(id(8), 0).unwrap();
        tree.delete_subcategory(id(1), id(4)).unwrap();
        tree.rearrange(id(2), 5).unwrap();
        tree.add_subcategory(id(1), node(9, "Late")).unwrap();
        tree.delete_category(id(8)).unwrap();
        tree.rearrange(id(9), 2).unwrap();

        assert_eq!(positions(&tree, 1), vec![0, 1, 2, 3, 4, 5]);
        assert!(tree.check_invariants().is_empty());
    }

    #[test]
    fn from_categories_orders_children_by_stored_position() {
        let mut rows = vec![node(1, "Root")];
        for (value, position) in [(2, 2), (3, 0), (4, 1)] {
            let mut child = node(value, "Child");
            child.parent_id = Some(id(1));
            child.position = CategoryPosition::new(position).unwrap();
            child.path = CategoryPath::child(&CategoryPath::root(id(1)), id(value));
            rows.push(child);
        }

        let tree = CategoryTree::from_categories(rows).unwrap();

        assert_eq!(tree.get(id(1)).unwrap().subcategories, vec![id(3), id(4), id(2)]);
        assert!(tree.check_invariants().is_empty());
    }

    #[test]
    fn from_categories_rejects_unknown_parents() {
        let mut orphan = node(2, "Orphan");
        orphan.parent_id = Some(id(1));

        let err = CategoryTree::from_categories(vec![orphan]).unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn check_invariants_reports_gaps_and_stale_paths() {
        let mut rows = vec![node(1, "Root")];
        for (value, position) in [(2, 0), (3, 2)] {
            let mut child = node(value, "Child");
            child.parent_id = Some(id(1));
            child.position = CategoryPosition::new(position).unwrap();
            child.path = CategoryPath::root(id(value));
            rows.push(child);
        }

        let tree = CategoryTree::from_categories(rows).unwrap();
        let violations = tree.check_invariants();

        assert!(violations.contains(&InvariantViolation::SparsePositions {
            parent: Some(id(1))
        }));
        assert!(violations.contains(&InvariantViolation::StalePath {
            id: id(3),
            expected: "1/3".to_string(),
            actual: "3".to_string(),
        }));
    }

    #[test]
    fn rename_inside_parent_cycle_terminates() {
        let mut a = node(2, "A");
        a.parent_id = Some(id(3));
        let mut b = node(3, "B");
        b.parent_id = Some(id(2));
        let tree_rows = vec![node(1, "Root"), a, b];
        let mut tree = CategoryTree::from_categories(tree_rows).unwrap();
        assert!(
            tree.check_invariants()
                .contains(&InvariantViolation::Unreachable(id(2)))
        );

        tree.modify_category(id(2), "Renamed").unwrap();

        assert_eq!(tree.get(id(2)).unwrap().name, "Renamed");
        assert_eq!(tree.len(), 3);
    }
}
