use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ArtifactId, DownloadUrl, VersionChanges, VersionId, VersionNumber};

/// A released version of an artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactVersion {
    pub id: VersionId,
    /// Back-reference to the owning artifact.
    pub artifact_id: ArtifactId,
    pub version_number: VersionNumber,
    pub update_date: NaiveDateTime,
    pub changes: VersionChanges,
    pub download_url: DownloadUrl,
}

/// Data required to insert a new [`ArtifactVersion`].
///
/// The update date is stamped at construction and never supplied by callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewArtifactVersion {
    pub version_number: VersionNumber,
    pub update_date: NaiveDateTime,
    pub changes: VersionChanges,
    pub download_url: DownloadUrl,
}

impl NewArtifactVersion {
    pub fn new(
        version_number: VersionNumber,
        changes: VersionChanges,
        download_url: DownloadUrl,
    ) -> Self {
        Self {
            version_number,
            update_date: Utc::now().naive_utc(),
            changes,
            download_url,
        }
    }
}
