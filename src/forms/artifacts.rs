use chrono::Utc;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::artifact::{ArtifactUpdate, NewArtifact};
use crate::domain::types::{
    ArtifactAuthor, ArtifactDescription, ArtifactTitle, ArtifactUrl, CategoryId, DocumentationType,
    DownloadUrl, Framework, LicenseType, ProgrammingLanguage, TypeConstraintError, VersionChanges,
    VersionNumber, is_version_shape,
};
use crate::domain::version::NewArtifactVersion;
use crate::forms::{FormError, failure, non_blank};
use crate::repository::{ArtifactListQuery, ArtifactSortField};

fn validate_version(value: &str) -> Result<(), ValidationError> {
    if is_version_shape(value.trim()) {
        Ok(())
    } else {
        Err(failure(
            "version",
            "Version must be in format: major.minor[.patch]",
        ))
    }
}

fn validate_documentation_type(value: &str) -> Result<(), ValidationError> {
    DocumentationType::try_from(value)
        .map(|_| ())
        .map_err(|_| failure("documentation_type", "Invalid documentation type"))
}

fn optional<T, F>(value: Option<String>, build: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    non_blank(value).map(build).transpose()
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArtifactForm {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: String,
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
    #[validate(custom(function = "validate_documentation_type"))]
    pub documentation_type: String,
    #[validate(length(
        min = 2,
        max = 100,
        message = "Author name must be between 2 and 100 characters"
    ))]
    pub author: String,
    #[validate(custom(function = "validate_version"))]
    pub current_version: String,
    #[validate(length(max = 50, message = "Programming language cannot exceed 50 characters"))]
    pub programming_language: Option<String>,
    #[validate(length(max = 50, message = "Framework cannot exceed 50 characters"))]
    pub framework: Option<String>,
    #[validate(length(max = 50, message = "License type cannot exceed 50 characters"))]
    pub license_type: Option<String>,
    #[validate(range(min = 1, message = "Category must be specified"))]
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateArtifactFormPayload {
    pub title: ArtifactTitle,
    pub description: ArtifactDescription,
    pub url: ArtifactUrl,
    pub documentation_type: DocumentationType,
    pub author: ArtifactAuthor,
    pub current_version: VersionNumber,
    pub programming_language: Option<ProgrammingLanguage>,
    pub framework: Option<Framework>,
    pub license_type: Option<LicenseType>,
    pub category_id: CategoryId,
}

impl CreateArtifactFormPayload {
    /// Stamps the creation time.
    pub fn into_new_artifact(self) -> NewArtifact {
        NewArtifact {
            title: self.title,
            description: self.description,
            url: self.url,
            documentation_type: self.documentation_type,
            created_at: Utc::now().naive_utc(),
            author: self.author,
            current_version: self.current_version,
            programming_language: self.programming_language,
            framework: self.framework,
            license_type: self.license_type,
            category_id: self.category_id,
        }
    }
}

impl TryFrom<CreateArtifactForm> for CreateArtifactFormPayload {
    type Error = FormError;

    fn try_from(value: CreateArtifactForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: ArtifactTitle::new(value.title)?,
            description: ArtifactDescription::new(value.description)?,
            url: ArtifactUrl::new(value.url)?,
            documentation_type: DocumentationType::try_from(value.documentation_type)?,
            author: ArtifactAuthor::new(value.author)?,
            current_version: VersionNumber::new(value.current_version)?,
            programming_language: optional(value.programming_language, ProgrammingLanguage::new)?,
            framework: optional(value.framework, Framework::new)?,
            license_type: optional(value.license_type, LicenseType::new)?,
            category_id: CategoryId::new(value.category_id)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateArtifactForm {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: String,
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
    #[validate(length(max = 50, message = "Programming language cannot exceed 50 characters"))]
    pub programming_language: Option<String>,
    #[validate(length(max = 50, message = "Framework cannot exceed 50 characters"))]
    pub framework: Option<String>,
    #[validate(length(max = 50, message = "License type cannot exceed 50 characters"))]
    pub license_type: Option<String>,
}

impl TryFrom<UpdateArtifactForm> for ArtifactUpdate {
    type Error = FormError;

    fn try_from(value: UpdateArtifactForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: ArtifactTitle::new(value.title)?,
            description: ArtifactDescription::new(value.description)?,
            url: ArtifactUrl::new(value.url)?,
            programming_language: optional(value.programming_language, ProgrammingLanguage::new)?,
            framework: optional(value.framework, Framework::new)?,
            license_type: optional(value.license_type, LicenseType::new)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArtifactVersionForm {
    #[validate(custom(function = "validate_version"))]
    pub version_number: String,
    #[validate(length(min = 1, max = 2000, message = "Changes cannot exceed 2000 characters"))]
    pub changes: String,
    #[validate(url(message = "Invalid URL format"))]
    pub download_url: String,
}

impl TryFrom<CreateArtifactVersionForm> for NewArtifactVersion {
    type Error = FormError;

    /// The update date is stamped here, callers never supply it.
    fn try_from(value: CreateArtifactVersionForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(NewArtifactVersion::new(
            VersionNumber::new(value.version_number)?,
            VersionChanges::new(value.changes)?,
            DownloadUrl::new(value.download_url)?,
        ))
    }
}

/// Query string of the artifact listing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ArtifactSearchForm {
    pub search_term: Option<String>,
    #[validate(length(max = 50, message = "Programming language cannot exceed 50 characters"))]
    pub programming_language: Option<String>,
    #[validate(length(max = 50, message = "Framework cannot exceed 50 characters"))]
    pub framework: Option<String>,
    #[validate(length(max = 50, message = "License type cannot exceed 50 characters"))]
    pub license_type: Option<String>,
    /// Comma separated category ids.
    pub category_ids: Option<String>,
    pub sort_field: Option<String>,
    pub sort_descending: Option<bool>,
    #[validate(range(
        min = 1,
        max = 1_000_000,
        message = "Page must be between 1 and 1000000"
    ))]
    pub page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSearchFormPayload {
    pub search_term: Option<String>,
    pub programming_language: Option<ProgrammingLanguage>,
    pub framework: Option<Framework>,
    pub license_type: Option<LicenseType>,
    pub category_ids: Vec<CategoryId>,
    pub sort_field: ArtifactSortField,
    pub sort_descending: bool,
    pub page: Option<usize>,
}

impl ArtifactSearchFormPayload {
    pub fn into_query(self, per_page: usize) -> ArtifactListQuery {
        let mut query = ArtifactListQuery::default()
            .categories(self.category_ids)
            .sort(self.sort_field, self.sort_descending);
        if let Some(term) = self.search_term {
            query = query.search(term);
        }
        if let Some(language) = self.programming_language {
            query = query.programming_language(language);
        }
        if let Some(framework) = self.framework {
            query = query.framework(framework);
        }
        if let Some(license_type) = self.license_type {
            query = query.license_type(license_type);
        }
        if let Some(page) = self.page {
            query = query.paginate(page, per_page);
        }
        query
    }
}

fn parse_category_ids(value: &str) -> Result<Vec<CategoryId>, TypeConstraintError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| TypeConstraintError::InvalidValue(format!("category id: {part}")))
                .and_then(CategoryId::new)
        })
        .collect()
}

impl TryFrom<ArtifactSearchForm> for ArtifactSearchFormPayload {
    type Error = FormError;

    fn try_from(value: ArtifactSearchForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let category_ids = match non_blank(value.category_ids) {
            Some(ids) => parse_category_ids(&ids)?,
            None => Vec::new(),
        };

        Ok(Self {
            search_term: non_blank(value.search_term).map(|term| term.trim().to_string()),
            programming_language: optional(value.programming_language, ProgrammingLanguage::new)?,
            framework: optional(value.framework, Framework::new)?,
            license_type: optional(value.license_type, LicenseType::new)?,
            category_ids,
            sort_field: value
                .sort_field
                .as_deref()
                .map(ArtifactSortField::parse)
                .unwrap_or_default(),
            sort_descending: value.sort_descending.unwrap_or(false),
            page: value.page,
        })
    }
}
