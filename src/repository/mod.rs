use crate::db::{DbConnection, DbPool};
use crate::domain::artifact::{Artifact, ArtifactUpdate, NewArtifact};
use crate::domain::category::{Category, NewCategory};
use crate::domain::category_tree::CategoryTree;
use crate::domain::error::DomainResult;
use crate::domain::types::{
    ArtifactId, CategoryId, Framework, LicenseType, ProgrammingLanguage,
};
use crate::domain::version::{ArtifactVersion, NewArtifactVersion};
use crate::pagination::Pagination;

pub mod artifact;
pub mod category;
pub mod errors;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Column used to order artifact listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArtifactSortField {
    #[default]
    Id,
    Title,
    Created,
    Author,
}

impl ArtifactSortField {
    /// Parses the `sort_field` query value; unknown names fall back to `Id`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Self::Title,
            "created" => Self::Created,
            "author" => Self::Author,
            _ => Self::Id,
        }
    }
}

/// Query parameters used when listing or searching artifacts.
#[derive(Debug, Clone, Default)]
pub struct ArtifactListQuery {
    /// Substring matched against title and description.
    pub search: Option<String>,
    pub programming_language: Option<ProgrammingLanguage>,
    pub framework: Option<Framework>,
    pub license_type: Option<LicenseType>,
    /// Restrict to artifacts filed under any of these categories.
    pub category_ids: Vec<CategoryId>,
    pub sort_field: ArtifactSortField,
    /// Reverse the order; ignored when sorting by id.
    pub sort_descending: bool,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ArtifactListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn programming_language(mut self, language: ProgrammingLanguage) -> Self {
        self.programming_language = Some(language);
        self
    }
    pub fn framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }
    pub fn license_type(mut self, license_type: LicenseType) -> Self {
        self.license_type = Some(license_type);
        self
    }
    pub fn categories(mut self, category_ids: Vec<CategoryId>) -> Self {
        self.category_ids = category_ids;
        self
    }
    pub fn sort(mut self, field: ArtifactSortField, descending: bool) -> Self {
        self.sort_field = field;
        self.sort_descending = descending;
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations on the category hierarchy.
pub trait CategoryReader {
    /// Load the whole hierarchy, including artifact links.
    fn load_category_tree(&self) -> RepositoryResult<CategoryTree>;
    /// Retrieve a category with its child and artifact lists.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations on the category hierarchy.
///
/// Structural changes go through [`CategoryTree`]; implementations persist
/// whatever the tree changed and discard everything when it rejects the
/// change.
pub trait CategoryWriter {
    /// Persist a new category as the last root or the last child of its parent.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Run `change` against the current hierarchy and persist the result.
    fn modify_category_tree<T, F>(&self, change: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut CategoryTree) -> DomainResult<T>;
}

/// Read-only operations for artifact entities.
pub trait ArtifactReader {
    /// List artifacts matching the supplied query, with the unpaginated total.
    fn list_artifacts(&self, query: ArtifactListQuery)
    -> RepositoryResult<(usize, Vec<Artifact>)>;
    /// Retrieve an artifact and all of its versions.
    fn get_artifact_by_id(&self, id: ArtifactId) -> RepositoryResult<Option<Artifact>>;
}

/// Write operations for artifacts and their versions.
pub trait ArtifactWriter {
    /// Persist a new artifact without versions; `NotFound` when its category
    /// does not exist.
    fn create_artifact(&self, artifact: &NewArtifact) -> RepositoryResult<Artifact>;
    /// Overwrite the editable metadata of an artifact.
    fn update_artifact(&self, id: ArtifactId, update: &ArtifactUpdate)
    -> RepositoryResult<usize>;
    /// Delete an artifact together with its versions.
    fn delete_artifact(&self, id: ArtifactId) -> RepositoryResult<usize>;
    /// Append a version and make it the artifact's current version.
    fn add_artifact_version(
        &self,
        id: ArtifactId,
        version: &NewArtifactVersion,
    ) -> RepositoryResult<ArtifactVersion>;
}
