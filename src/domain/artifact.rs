use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::types::{
    ArtifactAuthor, ArtifactDescription, ArtifactId, ArtifactTitle, ArtifactUrl, CategoryId,
    DocumentationType, Framework, LicenseType, ProgrammingLanguage, VersionNumber,
};
use crate::domain::version::ArtifactVersion;

/// A software-development artifact filed under one category.
///
/// `versions` is append-only and kept in the order versions were added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artifact {
    pub id: ArtifactId,
    pub title: ArtifactTitle,
    pub description: ArtifactDescription,
    pub url: ArtifactUrl,
    pub documentation_type: DocumentationType,
    pub created_at: NaiveDateTime,
    pub author: ArtifactAuthor,
    pub current_version: VersionNumber,
    pub programming_language: Option<ProgrammingLanguage>,
    pub framework: Option<Framework>,
    pub license_type: Option<LicenseType>,
    pub category_id: CategoryId,
    pub versions: Vec<ArtifactVersion>,
}

/// Data required to insert a new [`Artifact`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewArtifact {
    pub title: ArtifactTitle,
    pub description: ArtifactDescription,
    pub url: ArtifactUrl,
    pub documentation_type: DocumentationType,
    pub created_at: NaiveDateTime,
    pub author: ArtifactAuthor,
    pub current_version: VersionNumber,
    pub programming_language: Option<ProgrammingLanguage>,
    pub framework: Option<Framework>,
    pub license_type: Option<LicenseType>,
    pub category_id: CategoryId,
}

/// Editable subset of artifact metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactUpdate {
    pub title: ArtifactTitle,
    pub description: ArtifactDescription,
    pub url: ArtifactUrl,
    pub programming_language: Option<ProgrammingLanguage>,
    pub framework: Option<Framework>,
    pub license_type: Option<LicenseType>,
}

impl Artifact {
    /// Appends `version` and makes its number the current version.
    ///
    /// The most recently added version always wins, even when its number is
    /// lower than the current one.
    pub fn add_version(&mut self, version: ArtifactVersion) -> DomainResult<&ArtifactVersion> {
        if version.artifact_id != self.id {
            return Err(DomainError::InvalidArgument(format!(
                "version {} belongs to artifact {}, not {}",
                version.id, version.artifact_id, self.id
            )));
        }
        if self.versions.iter().any(|existing| existing.id == version.id) {
            return Err(DomainError::InvalidArgument(format!(
                "version {} is already recorded",
                version.id
            )));
        }

        self.current_version = version.version_number.clone();
        self.versions.push(version);
        Ok(&self.versions[self.versions.len() - 1])
    }

    /// Versions ordered by update date, newest first.
    ///
    /// Versions sharing an update date are listed most recently added first.
    pub fn version_history(&self) -> Vec<&ArtifactVersion> {
        let mut history: Vec<&ArtifactVersion> = self.versions.iter().rev().collect();
        history.sort_by(|a, b| b.update_date.cmp(&a.update_date));
        history
    }

    pub fn apply_update(&mut self, update: ArtifactUpdate) {
        self.title = update.title;
        self.description = update.description;
        self.url = update.url;
        self.programming_language = update.programming_language;
        self.framework = update.framework;
        self.license_type = update.license_type;
    }
}
