use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::artifact::{
    Artifact as DomainArtifact, ArtifactUpdate, NewArtifact as DomainNewArtifact,
};
use crate::domain::types::{
    ArtifactAuthor, ArtifactDescription, ArtifactTitle, ArtifactUrl, DocumentationType,
    Framework, LicenseType, ProgrammingLanguage, TypeConstraintError, VersionNumber,
};

/// Diesel model representing a row in the `artifacts` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::artifacts)]
pub struct Artifact {
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
}

/// Insertable form of [`Artifact`] used for creating new rows.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::artifacts)]
pub struct NewArtifact<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub documentation_type: &'a str,
    pub created_at: NaiveDateTime,
    pub author: &'a str,
    pub current_version: &'a str,
    pub programming_language: Option<&'a str>,
    pub framework: Option<&'a str>,
    pub license_type: Option<&'a str>,
    pub category_id: i32,
}

/// Metadata columns editable after creation.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::artifacts, treat_none_as_null = true)]
pub struct ArtifactChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub programming_language: Option<&'a str>,
    pub framework: Option<&'a str>,
    pub license_type: Option<&'a str>,
}

impl TryFrom<Artifact> for DomainArtifact {
    type Error = TypeConstraintError;

    /// Versions are loaded separately and start out empty.
    fn try_from(artifact: Artifact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: artifact.id.try_into()?,
            title: ArtifactTitle::new(artifact.title)?,
            description: ArtifactDescription::new(artifact.description)?,
            url: ArtifactUrl::new(artifact.url)?,
            documentation_type: DocumentationType::try_from(artifact.documentation_type)?,
            created_at: artifact.created_at,
            author: ArtifactAuthor::new(artifact.author)?,
            current_version: VersionNumber::new(artifact.current_version)?,
            programming_language: artifact
                .programming_language
                .map(ProgrammingLanguage::new)
                .transpose()?,
            framework: artifact.framework.map(Framework::new).transpose()?,
            license_type: artifact.license_type.map(LicenseType::new).transpose()?,
            category_id: artifact.category_id.try_into()?,
            versions: Vec::new(),
        })
    }
}

impl<'a> From<&'a DomainNewArtifact> for NewArtifact<'a> {
    fn from(artifact: &'a DomainNewArtifact) -> Self {
        Self {
            title: artifact.title.as_str(),
            description: artifact.description.as_str(),
            url: artifact.url.as_str(),
            documentation_type: artifact.documentation_type.as_str(),
            created_at: artifact.created_at,
            author: artifact.author.as_str(),
            current_version: artifact.current_version.as_str(),
            programming_language: artifact.programming_language.as_deref(),
            framework: artifact.framework.as_deref(),
            license_type: artifact.license_type.as_deref(),
            category_id: artifact.category_id.get(),
        }
    }
}

impl<'a> From<&'a ArtifactUpdate> for ArtifactChangeset<'a> {
    fn from(update: &'a ArtifactUpdate) -> Self {
        Self {
            title: update.title.as_str(),
            description: update.description.as_str(),
            url: update.url.as_str(),
            programming_language: update.programming_language.as_deref(),
            framework: update.framework.as_deref(),
            license_type: update.license_type.as_deref(),
        }
    }
}
