use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::{Category, NewCategory};
use crate::domain::category_tree::CategoryTree;
use crate::domain::error::DomainResult;
use crate::domain::types::{ArtifactId, CategoryId};
use crate::models::category::{
    Category as DbCategory, CategoryChangeset, NewCategory as DbNewCategory,
};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, RepositoryError, RepositoryResult,
};

/// Loads every category and artifact link into a tree.
fn load_tree(conn: &mut SqliteConnection) -> RepositoryResult<CategoryTree> {
    use crate::schema::{artifacts, categories};

    let categories = categories::table
        .load::<DbCategory>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Category>, _>>()?;
    let mut tree = CategoryTree::from_categories(categories)?;

    let links = artifacts::table
        .select((artifacts::id, artifacts::category_id))
        .order(artifacts::id.asc())
        .load::<(i32, i32)>(conn)?;
    for (artifact_id, category_id) in links {
        tree.link_artifact(CategoryId::new(category_id)?, ArtifactId::new(artifact_id)?)?;
    }

    for violation in tree.check_invariants() {
        log::warn!("Stored category tree is inconsistent: {violation}");
    }

    Ok(tree)
}

fn differs(before: Option<&Category>, after: &Category) -> bool {
    match before {
        Some(before) => {
            before.name != after.name
                || before.parent_id != after.parent_id
                || before.position != after.position
                || before.path != after.path
        }
        None => true,
    }
}

/// Writes the rows that changed between `snapshot` and `tree`.
fn persist_changes(
    conn: &mut SqliteConnection,
    snapshot: &CategoryTree,
    tree: &CategoryTree,
) -> RepositoryResult<()> {
    use crate::schema::categories;

    let mut removed: Vec<i32> = snapshot
        .iter()
        .filter(|category| !tree.contains(category.id))
        .map(|category| category.id.get())
        .collect();
    removed.sort_unstable();
    if !removed.is_empty() {
        diesel::delete(categories::table.filter(categories::id.eq_any(&removed)))
            .execute(conn)?;
    }

    for category in tree.iter() {
        if !differs(snapshot.get(category.id), category) {
            continue;
        }
        diesel::update(categories::table.find(category.id.get()))
            .set(CategoryChangeset::from(category))
            .execute(conn)?;
    }

    Ok(())
}

impl CategoryReader for DieselRepository {
    fn load_category_tree(&self) -> RepositoryResult<CategoryTree> {
        let mut conn = self.conn()?;
        load_tree(&mut conn)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let exists = categories::table
            .find(id.get())
            .select(categories::id)
            .first::<i32>(&mut conn)
            .optional()?;
        if exists.is_none() {
            return Ok(None);
        }

        let tree = load_tree(&mut conn)?;
        Ok(tree.get(id).cloned())
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let mut tree = load_tree(conn)?;
            let snapshot = tree.clone();

            // Parent, position and path are written once the tree accepted
            // the new node.
            let id: i32 = diesel::insert_into(categories::table)
                .values(DbNewCategory {
                    name: category.name.as_str(),
                    parent_id: None,
                    position: 0,
                    path: "",
                })
                .returning(categories::id)
                .get_result(conn)?;
            let id = CategoryId::new(id)?;

            let detached = Category::detached(id, category.name.clone());
            match category.parent_id {
                Some(parent_id) => tree.add_subcategory(parent_id, detached)?,
                None => tree.add_root(detached)?,
            };

            persist_changes(conn, &snapshot, &tree)?;
            tree.get(id).cloned().ok_or(RepositoryError::NotFound)
        })
    }

    fn modify_category_tree<T, F>(&self, change: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut CategoryTree) -> DomainResult<T>,
    {
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let mut tree = load_tree(conn)?;
            let snapshot = tree.clone();

            let outcome = change(&mut tree)?;

            persist_changes(conn, &snapshot, &tree)?;
            Ok(outcome)
        })
    }
}
