use crate::domain::artifact::ArtifactUpdate;
use crate::domain::types::ArtifactId;
use crate::domain::version::NewArtifactVersion;
use crate::dto::artifacts::{ArtifactDto, ArtifactVersionDto};
use crate::forms::artifacts::{ArtifactSearchFormPayload, CreateArtifactFormPayload};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{ArtifactReader, ArtifactWriter};

use super::{ServiceError, ServiceResult};

/// Artifacts matching the search, in the requested order.
pub fn list_artifacts<R>(
    payload: ArtifactSearchFormPayload,
    repo: &R,
) -> ServiceResult<Vec<ArtifactDto>>
where
    R: ArtifactReader,
{
    match repo.list_artifacts(payload.into_query(DEFAULT_ITEMS_PER_PAGE)) {
        Ok((_total, artifacts)) => Ok(artifacts.iter().map(ArtifactDto::from).collect()),
        Err(e) => Err(ServiceError::from_repository("list artifacts", e)),
    }
}

pub fn show_artifact<R>(artifact_id: ArtifactId, repo: &R) -> ServiceResult<ArtifactDto>
where
    R: ArtifactReader,
{
    match repo.get_artifact_by_id(artifact_id) {
        Ok(Some(artifact)) => Ok(ArtifactDto::from(artifact)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(ServiceError::from_repository("get artifact", e)),
    }
}

/// Files a new artifact under an existing category.
pub fn create_artifact<R>(
    payload: CreateArtifactFormPayload,
    repo: &R,
) -> ServiceResult<ArtifactDto>
where
    R: ArtifactWriter,
{
    let artifact = repo
        .create_artifact(&payload.into_new_artifact())
        .map_err(|e| ServiceError::from_repository("create artifact", e))?;

    log::info!(
        "Created artifact {} ({}) in category {}",
        artifact.id,
        artifact.title,
        artifact.category_id
    );
    Ok(ArtifactDto::from(artifact))
}

pub fn update_artifact<R>(
    artifact_id: ArtifactId,
    update: ArtifactUpdate,
    repo: &R,
) -> ServiceResult<()>
where
    R: ArtifactWriter,
{
    match repo.update_artifact(artifact_id, &update) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Updated artifact {artifact_id}");
            Ok(())
        }
        Err(e) => Err(ServiceError::from_repository("update artifact", e)),
    }
}

pub fn delete_artifact<R>(artifact_id: ArtifactId, repo: &R) -> ServiceResult<()>
where
    R: ArtifactWriter,
{
    match repo.delete_artifact(artifact_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Deleted artifact {artifact_id}");
            Ok(())
        }
        Err(e) => Err(ServiceError::from_repository("delete artifact", e)),
    }
}

/// Records a new version; it becomes the current version even when its
/// number is lower.
pub fn add_version<R>(
    artifact_id: ArtifactId,
    version: NewArtifactVersion,
    repo: &R,
) -> ServiceResult<ArtifactVersionDto>
where
    R: ArtifactWriter,
{
    let added = repo
        .add_artifact_version(artifact_id, &version)
        .map_err(|e| ServiceError::from_repository("add artifact version", e))?;

    log::info!(
        "Artifact {artifact_id} is now at version {}",
        added.version_number
    );
    Ok(ArtifactVersionDto::from(&added))
}

/// Versions of an artifact, newest first.
pub fn version_history<R>(
    artifact_id: ArtifactId,
    repo: &R,
) -> ServiceResult<Vec<ArtifactVersionDto>>
where
    R: ArtifactReader,
{
    match repo.get_artifact_by_id(artifact_id) {
        Ok(Some(artifact)) => Ok(artifact
            .version_history()
            .into_iter()
            .map(ArtifactVersionDto::from)
            .collect()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(ServiceError::from_repository("get artifact", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{
        ArtifactAuthor, ArtifactDescription, ArtifactTitle, ArtifactUrl, CategoryId,
        DocumentationType, DownloadUrl, ProgrammingLanguage, VersionChanges, VersionNumber,
    };
    use crate::repository::test::TestRepository;
    use crate::repository::{ArtifactSortField, CategoryReader};

    fn version(number: &str) -> NewArtifactVersion {
        NewArtifactVersion::new(
            VersionNumber::new(number).unwrap(),
            VersionChanges::new(format!("Release {number}")).unwrap(),
            DownloadUrl::new(format!("https://example.com/{number}.zip")).unwrap(),
        )
    }

    fn create_payload(category_id: CategoryId) -> CreateArtifactFormPayload {
        CreateArtifactFormPayload {
            title: ArtifactTitle::new("Tokio tutorial").unwrap(),
            description: ArtifactDescription::new("Async runtime walkthrough").unwrap(),
            url: ArtifactUrl::new("https://tokio.rs/tokio/tutorial").unwrap(),
            documentation_type: DocumentationType::Tutorial,
            author: ArtifactAuthor::new("Tokio team").unwrap(),
            current_version: VersionNumber::new("1.0").unwrap(),
            programming_language: Some(ProgrammingLanguage::new("Rust").unwrap()),
            framework: None,
            license_type: None,
            category_id,
        }
    }

    fn search() -> ArtifactSearchFormPayload {
        ArtifactSearchFormPayload {
            search_term: None,
            programming_language: None,
            framework: None,
            license_type: None,
            category_ids: Vec::new(),
            sort_field: ArtifactSortField::Id,
            sort_descending: false,
            page: None,
        }
    }

    #[test]
    fn create_artifact_requires_existing_category() {
        let repo = TestRepository::new();

        let err = create_artifact(create_payload(CategoryId::new(5).unwrap()), &repo).unwrap_err();

        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn create_artifact_links_it_to_category() {
        let repo = TestRepository::new();
        let category = repo.with_category("Runtimes", None);

        let created = create_artifact(create_payload(category.id), &repo).unwrap();

        assert_eq!(created.category_id, category.id.get());
        assert_eq!(created.documentation_type, "Tutorial");
        let tree = repo.load_category_tree().unwrap();
        assert!(!tree.category_is_empty(category.id).unwrap());
    }

    #[test]
    fn last_added_version_becomes_current() {
        let repo = TestRepository::new();
        let category = repo.with_category("Runtimes", None);
        let artifact = repo.with_artifact("Tokio tutorial", category.id);

        add_version(artifact.id, version("1.0"), &repo).unwrap();
        let added = add_version(artifact.id, version("0.9"), &repo).unwrap();

        assert_eq!(added.version_number, "0.9");
        let shown = show_artifact(artifact.id, &repo).unwrap();
        assert_eq!(shown.current_version, "0.9");
        assert_eq!(shown.versions.len(), 2);
    }

    #[test]
    fn history_lists_latest_addition_first_on_equal_dates() {
        let repo = TestRepository::new();
        let category = repo.with_category("Runtimes", None);
        let artifact = repo.with_artifact("Tokio tutorial", category.id);

        let first = version("1.0");
        let mut second = version("1.1");
        second.update_date = first.update_date;
        add_version(artifact.id, first, &repo).unwrap();
        add_version(artifact.id, second, &repo).unwrap();

        let history = version_history(artifact.id, &repo).unwrap();
        let numbers: Vec<&str> = history.iter().map(|v| v.version_number.as_str()).collect();
        assert_eq!(numbers, vec!["1.1", "1.0"]);
    }

    #[test]
    fn versions_of_missing_artifacts_are_not_found() {
        let repo = TestRepository::new();
        let missing = ArtifactId::new(3).unwrap();

        assert_eq!(
            add_version(missing, version("1.0"), &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            version_history(missing, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn update_and_delete_report_missing_artifacts() {
        let repo = TestRepository::new();
        let missing = ArtifactId::new(3).unwrap();
        let update = ArtifactUpdate {
            title: ArtifactTitle::new("Renamed").unwrap(),
            description: ArtifactDescription::new("Still here").unwrap(),
            url: ArtifactUrl::new("https://example.com").unwrap(),
            programming_language: None,
            framework: None,
            license_type: None,
        };

        assert_eq!(
            update_artifact(missing, update, &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(delete_artifact(missing, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn list_filters_by_search_term() {
        let repo = TestRepository::new();
        let category = repo.with_category("Docs", None);
        repo.with_artifact("Serde guide", category.id);
        repo.with_artifact("Tokio tutorial", category.id);

        let mut query = search();
        query.search_term = Some("serde".into());
        let found = list_artifacts(query, &repo).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Serde guide");
    }

    #[test]
    fn delete_unlinks_artifact_from_category() {
        let repo = TestRepository::new();
        let category = repo.with_category("Docs", None);
        let artifact = repo.with_artifact("Serde guide", category.id);

        delete_artifact(artifact.id, &repo).unwrap();

        let tree = repo.load_category_tree().unwrap();
        assert!(tree.category_is_empty(category.id).unwrap());
    }
}
