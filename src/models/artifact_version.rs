use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{DownloadUrl, TypeConstraintError, VersionChanges, VersionNumber};
use crate::domain::version::{
    ArtifactVersion as DomainArtifactVersion, NewArtifactVersion as DomainNewArtifactVersion,
};

/// Diesel model representing the `artifact_versions` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::artifact_versions)]
pub struct ArtifactVersion {
    pub id: i32,
    pub artifact_id: i32,
    pub version_number: String,
    pub update_date: NaiveDateTime,
    pub changes: String,
    pub download_url: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::artifact_versions)]
pub struct NewArtifactVersion<'a> {
    pub artifact_id: i32,
    pub version_number: &'a str,
    pub update_date: NaiveDateTime,
    pub changes: &'a str,
    pub download_url: &'a str,
}

impl TryFrom<ArtifactVersion> for DomainArtifactVersion {
    type Error = TypeConstraintError;

    fn try_from(version: ArtifactVersion) -> Result<Self, Self::Error> {
        Ok(Self {
            id: version.id.try_into()?,
            artifact_id: version.artifact_id.try_into()?,
            version_number: VersionNumber::new(version.version_number)?,
            update_date: version.update_date,
            changes: VersionChanges::new(version.changes)?,
            download_url: DownloadUrl::new(version.download_url)?,
        })
    }
}

impl<'a> NewArtifactVersion<'a> {
    pub fn for_artifact(artifact_id: i32, version: &'a DomainNewArtifactVersion) -> Self {
        Self {
            artifact_id,
            version_number: version.version_number.as_str(),
            update_date: version.update_date,
            changes: version.changes.as_str(),
            download_url: version.download_url.as_str(),
        }
    }
}
