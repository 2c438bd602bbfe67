use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::artifact::Artifact;
use crate::domain::version::ArtifactVersion;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactVersionDto {
    pub id: i32,
    pub artifact_id: i32,
    pub version_number: String,
    pub update_date: NaiveDateTime,
    pub changes: String,
    pub download_url: String,
}

impl From<&ArtifactVersion> for ArtifactVersionDto {
    fn from(value: &ArtifactVersion) -> Self {
        Self {
            id: value.id.get(),
            artifact_id: value.artifact_id.get(),
            version_number: value.version_number.as_str().to_string(),
            update_date: value.update_date,
            changes: value.changes.as_str().to_string(),
            download_url: value.download_url.as_str().to_string(),
        }
    }
}

/// JSON view of an artifact; `versions` are listed newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub documentation_type: String,
    pub created_at: NaiveDateTime,
    pub author: String,
    pub current_version: String,
    pub programming_language: Option<String>,
    pub framework: Option<String>,
    pub license_type: Option<String>,
    pub category_id: i32,
    pub versions: Vec<ArtifactVersionDto>,
}

impl From<&Artifact> for ArtifactDto {
    fn from(value: &Artifact) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.as_str().to_string(),
            description: value.description.as_str().to_string(),
            url: value.url.as_str().to_string(),
            documentation_type: value.documentation_type.as_str().to_string(),
            created_at: value.created_at,
            author: value.author.as_str().to_string(),
            current_version: value.current_version.as_str().to_string(),
            programming_language: value.programming_language.as_deref().map(str::to_string),
            framework: value.framework.as_deref().map(str::to_string),
            license_type: value.license_type.as_deref().map(str::to_string),
            category_id: value.category_id.get(),
            versions: value
                .version_history()
                .into_iter()
                .map(ArtifactVersionDto::from)
                .collect(),
        }
    }
}

impl From<Artifact> for ArtifactDto {
    fn from(value: Artifact) -> Self {
        Self::from(&value)
    }
}
