use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{
    CreateCategoryFormPayload, RearrangeCategoryFormPayload, UpdateCategoryFormPayload,
};
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// Root categories with their subtrees.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.load_category_tree() {
        Ok(tree) => Ok(CategoryDto::forest(&tree)),
        Err(e) => Err(ServiceError::from_repository("load categories", e)),
    }
}

pub fn show_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    let tree = repo
        .load_category_tree()
        .map_err(|e| ServiceError::from_repository("load categories", e))?;

    match tree.get(category_id) {
        Some(category) => Ok(CategoryDto::from_tree(&tree, category)),
        None => Err(ServiceError::NotFound),
    }
}

pub fn create_category<R>(
    payload: CreateCategoryFormPayload,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    let created = repo
        .create_category(&payload.into_new_category())
        .map_err(|e| ServiceError::from_repository("create category", e))?;

    log::info!(
        "Created category {} ({}) at {}",
        created.id,
        created.name,
        created.path
    );

    let tree = repo
        .load_category_tree()
        .map_err(|e| ServiceError::from_repository("load categories", e))?;
    Ok(CategoryDto::from_tree(&tree, &created))
}

fn ensure_exists<R>(category_id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(ServiceError::from_repository("get category", e)),
    }
}

/// Renames a category; its subtree paths are refreshed in the same change.
pub fn update_category<R>(
    category_id: CategoryId,
    payload: UpdateCategoryFormPayload,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_exists(category_id, repo)?;

    repo.modify_category_tree(|tree| tree.modify_category(category_id, payload.name.as_str()))
        .map_err(|e| ServiceError::from_repository("update category", e))?;

    log::info!("Renamed category {category_id} to {}", payload.name);
    Ok(())
}

pub fn rearrange_category<R>(
    category_id: CategoryId,
    payload: RearrangeCategoryFormPayload,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_exists(category_id, repo)?;

    repo.modify_category_tree(|tree| tree.rearrange(category_id, payload.new_position))
        .map_err(|e| ServiceError::from_repository("rearrange category", e))?;

    log::info!(
        "Moved category {category_id} to position {}",
        payload.new_position
    );
    Ok(())
}

/// Deletes an empty category and closes the gap among its siblings.
pub fn delete_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_exists(category_id, repo)?;

    let removed = repo
        .modify_category_tree(|tree| tree.delete_category(category_id))
        .map_err(|e| ServiceError::from_repository("delete category", e))?;

    log::info!("Deleted category {} ({})", removed.id, removed.name);
    Ok(())
}
