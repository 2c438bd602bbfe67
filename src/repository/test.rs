use std::sync::Mutex;

use chrono::Utc;

use crate::domain::artifact::{Artifact, ArtifactUpdate, NewArtifact};
use crate::domain::category::{Category, NewCategory};
use crate::domain::category_tree::CategoryTree;
use crate::domain::error::DomainResult;
use crate::domain::types::{ArtifactId, CategoryId, VersionId};
use crate::domain::version::{ArtifactVersion, NewArtifactVersion};
use crate::repository::{
    ArtifactListQuery, ArtifactReader, ArtifactSortField, ArtifactWriter, CategoryReader,
    CategoryWriter, RepositoryError, RepositoryResult,
};

#[derive(Default)]
struct State {
    tree: CategoryTree,
    artifacts: Vec<Artifact>,
    next_category_id: i32,
    next_artifact_id: i32,
    next_version_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Simple in-memory repository used for unit tests.
///
/// Tree mutations run against a copy that only replaces the stored tree when
/// the change succeeds.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category the same way the service does and returns it.
    pub fn with_category(&self, name: &str, parent_id: Option<CategoryId>) -> Category {
        let category = NewCategory {
            name: name.try_into().unwrap(),
            parent_id,
        };
        self.create_category(&category).unwrap()
    }

    /// Adds an artifact filed under `category_id`.
    pub fn with_artifact(&self, title: &str, category_id: CategoryId) -> Artifact {
        use crate::domain::types::{
            ArtifactAuthor, ArtifactDescription, ArtifactTitle, ArtifactUrl, DocumentationType,
            VersionNumber,
        };

        let artifact = NewArtifact {
            title: ArtifactTitle::new(title).unwrap(),
            description: ArtifactDescription::new(format!("About {title}")).unwrap(),
            url: ArtifactUrl::new("https://example.com/docs").unwrap(),
            documentation_type: DocumentationType::ReferenceManual,
            created_at: Utc::now().naive_utc(),
            author: ArtifactAuthor::new("Jane Doe").unwrap(),
            current_version: VersionNumber::new("1.0").unwrap(),
            programming_language: None,
            framework: None,
            license_type: None,
            category_id,
        };
        self.create_artifact(&artifact).unwrap()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

impl CategoryReader for TestRepository {
    fn load_category_tree(&self) -> RepositoryResult<CategoryTree> {
        Ok(self.lock().tree.clone())
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self.lock().tree.get(id).cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut state = self.lock();
        let mut tree = state.tree.clone();

        let id = CategoryId::new(next_id(&mut state.next_category_id))?;
        let detached = Category::detached(id, category.name.clone());
        let created = match category.parent_id {
            Some(parent_id) => tree.add_subcategory(parent_id, detached)?.clone(),
            None => tree.add_root(detached)?.clone(),
        };

        state.tree = tree;
        Ok(created)
    }

    fn modify_category_tree<T, F>(&self, change: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut CategoryTree) -> DomainResult<T>,
    {
        let mut state = self.lock();
        let mut tree = state.tree.clone();
        let outcome = change(&mut tree)?;
        state.tree = tree;
        Ok(outcome)
    }
}

impl ArtifactReader for TestRepository {
    fn list_artifacts(
        &self,
        query: ArtifactListQuery,
    ) -> RepositoryResult<(usize, Vec<Artifact>)> {
        let mut items: Vec<Artifact> = self.lock().artifacts.clone();

        if let Some(search) = &query.search {
            let search = search.to_lowercase();
            items.retain(|a| {
                a.title.to_lowercase().contains(&search)
                    || a.description.to_lowercase().contains(&search)
            });
        }
        if let Some(language) = &query.programming_language {
            items.retain(|a| a.programming_language.as_ref() == Some(language));
        }
        if let Some(framework) = &query.framework {
            items.retain(|a| a.framework.as_ref() == Some(framework));
        }
        if let Some(license_type) = &query.license_type {
            items.retain(|a| a.license_type.as_ref() == Some(license_type));
        }
        if !query.category_ids.is_empty() {
            items.retain(|a| query.category_ids.contains(&a.category_id));
        }

        match query.sort_field {
            ArtifactSortField::Title => items.sort_by(|a, b| a.title.cmp(&b.title)),
            ArtifactSortField::Created => items.sort_by_key(|a| a.created_at),
            ArtifactSortField::Author => items.sort_by(|a, b| a.author.cmp(&b.author)),
            ArtifactSortField::Id => items.sort_by_key(|a| a.id),
        }
        if query.sort_descending && query.sort_field != ArtifactSortField::Id {
            items.reverse();
        }

        let total = items.len();
        if let Some(pagination) = &query.pagination {
            items = items
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .collect();
        }
        Ok((total, items))
    }

    fn get_artifact_by_id(&self, id: ArtifactId) -> RepositoryResult<Option<Artifact>> {
        Ok(self.lock().artifacts.iter().find(|a| a.id == id).cloned())
    }
}

impl ArtifactWriter for TestRepository {
    fn create_artifact(&self, artifact: &NewArtifact) -> RepositoryResult<Artifact> {
        let mut state = self.lock();
        if !state.tree.contains(artifact.category_id) {
            return Err(RepositoryError::NotFound);
        }
        let id = ArtifactId::new(next_id(&mut state.next_artifact_id))?;
        state.tree.link_artifact(artifact.category_id, id)?;

        let created = Artifact {
            id,
            title: artifact.title.clone(),
            description: artifact.description.clone(),
            url: artifact.url.clone(),
            documentation_type: artifact.documentation_type,
            created_at: artifact.created_at,
            author: artifact.author.clone(),
            current_version: artifact.current_version.clone(),
            programming_language: artifact.programming_language.clone(),
            framework: artifact.framework.clone(),
            license_type: artifact.license_type.clone(),
            category_id: artifact.category_id,
            versions: Vec::new(),
        };
        state.artifacts.push(created.clone());
        Ok(created)
    }

    fn update_artifact(
        &self,
        id: ArtifactId,
        update: &ArtifactUpdate,
    ) -> RepositoryResult<usize> {
        let mut state = self.lock();
        match state.artifacts.iter_mut().find(|a| a.id == id) {
            Some(artifact) => {
                artifact.apply_update(update.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_artifact(&self, id: ArtifactId) -> RepositoryResult<usize> {
        let mut state = self.lock();
        let Some(index) = state.artifacts.iter().position(|a| a.id == id) else {
            return Ok(0);
        };
        let removed = state.artifacts.remove(index);
        state.tree.unlink_artifact(removed.category_id, id);
        Ok(1)
    }

    fn add_artifact_version(
        &self,
        id: ArtifactId,
        version: &NewArtifactVersion,
    ) -> RepositoryResult<ArtifactVersion> {
        let mut state = self.lock();
        let version_id = VersionId::new(next_id(&mut state.next_version_id))?;
        let artifact = state
            .artifacts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let added = artifact.add_version(ArtifactVersion {
            id: version_id,
            artifact_id: id,
            version_number: version.version_number.clone(),
            update_date: version.update_date,
            changes: version.changes.clone(),
            download_url: version.download_url.clone(),
        })?;
        Ok(added.clone())
    }
}
