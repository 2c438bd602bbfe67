//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string was shorter than the permitted minimum.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    /// A string was longer than the permitted maximum.
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Version string did not match `major.minor[.patch]`.
    #[error("version must be in format: major.minor[.patch]")]
    InvalidVersion,
    /// Materialized path was not a `/`-separated list of ids.
    #[error("invalid category path: {0}")]
    InvalidPath(String),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

fn trim_and_bound_length<S: Into<String>>(
    value: S,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<String, TypeConstraintError> {
    let trimmed = trim_and_require_non_empty(value, field)?;
    let length = trimmed.chars().count();
    if length < min {
        return Err(TypeConstraintError::TooShort { field, min });
    }
    if length > max {
        return Err(TypeConstraintError::TooLong { field, max });
    }
    Ok(trimmed)
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

/// Trimmed text with an inclusive character-count range.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $min:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Minimum number of characters after trimming.
            pub const MIN_CHARS: usize = $min;
            /// Maximum number of characters after trimming.
            pub const MAX_CHARS: usize = $max;

            /// Constructs a trimmed value within the permitted length.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_bound_length(value, $field, $min, $max).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }

            /// Borrow the URL as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned URL.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(
    ArtifactId,
    "Unique identifier for an artifact.",
    "artifact_id"
);
id_newtype!(
    VersionId,
    "Unique identifier for an artifact version.",
    "version_id"
);

bounded_string_newtype!(
    CategoryName,
    "Category name, 1 to 100 characters.",
    "category name",
    1,
    100
);
bounded_string_newtype!(
    ArtifactTitle,
    "Artifact title, 3 to 200 characters.",
    "title",
    3,
    200
);
bounded_string_newtype!(
    ArtifactDescription,
    "Artifact description, up to 2000 characters.",
    "description",
    1,
    2000
);
bounded_string_newtype!(
    ArtifactAuthor,
    "Artifact author name, 2 to 100 characters.",
    "author",
    2,
    100
);
bounded_string_newtype!(
    ProgrammingLanguage,
    "Programming language label.",
    "programming language",
    1,
    50
);
bounded_string_newtype!(Framework, "Framework label.", "framework", 1, 50);
bounded_string_newtype!(LicenseType, "License label.", "license type", 1, 50);
bounded_string_newtype!(
    VersionChanges,
    "Change notes attached to a version.",
    "changes",
    1,
    2000
);

url_string_newtype!(ArtifactUrl, "Artifact home URL.", "url");
url_string_newtype!(DownloadUrl, "Download URL of a version.", "download url");

/// Zero-based position of a category among its siblings.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryPosition(i32);

impl CategoryPosition {
    /// Constructs a position that must be zero or greater.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("position"))
        }
    }

    /// Position for the sibling at `index` in an ordered sibling list.
    pub(crate) fn from_index(index: usize) -> Self {
        Self(i32::try_from(index).unwrap_or(i32::MAX))
    }

    /// Returns the raw `i32` value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for CategoryPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for CategoryPosition {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<i32> for CategoryPosition {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

/// Materialized ancestor chain of a category, `<rootId>/<...>/<selfId>`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryPath(String);

impl CategoryPath {
    pub const SEPARATOR: char = '/';

    /// Path of a root category: its own id.
    pub fn root(id: CategoryId) -> Self {
        Self(id.to_string())
    }

    /// Path of `id` placed directly under `parent`.
    pub fn child(parent: &CategoryPath, id: CategoryId) -> Self {
        Self(format!("{}{}{}", parent.0, Self::SEPARATOR, id))
    }

    /// Depth derived from the number of separators; roots are level zero.
    pub fn level(&self) -> usize {
        self.0.matches(Self::SEPARATOR).count()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CategoryPath {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let valid = !value.is_empty()
            && value
                .split(Self::SEPARATOR)
                .all(|segment| segment.parse::<i32>().is_ok_and(|id| id > 0));
        if valid {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidPath(value))
        }
    }
}

impl From<CategoryPath> for String {
    fn from(value: CategoryPath) -> Self {
        value.0
    }
}

/// Version label in `major.minor[.patch]` form.
///
/// Only the shape is checked; versions are never compared semantically.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct VersionNumber(String);

impl VersionNumber {
    pub const MAX_CHARS: usize = 20;

    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "version")?;
        if trimmed.len() > Self::MAX_CHARS {
            return Err(TypeConstraintError::TooLong {
                field: "version",
                max: Self::MAX_CHARS,
            });
        }
        if !is_version_shape(&trimmed) {
            return Err(TypeConstraintError::InvalidVersion);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `true` for two or three dot-separated, non-empty runs of ASCII digits.
pub fn is_version_shape(value: &str) -> bool {
    let parts: Vec<&str> = value.split('.').collect();
    (2..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

impl Display for VersionNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VersionNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for VersionNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionNumber> for String {
    fn from(value: VersionNumber) -> Self {
        value.0
    }
}

impl PartialEq<&str> for VersionNumber {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Kind of documentation an artifact provides.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum DocumentationType {
    ApiDocumentation,
    UserGuide,
    TechnicalSpecification,
    CodeDocumentation,
    Tutorial,
    SampleCode,
    ReferenceManual,
}

impl DocumentationType {
    pub const ALL: [DocumentationType; 7] = [
        Self::ApiDocumentation,
        Self::UserGuide,
        Self::TechnicalSpecification,
        Self::CodeDocumentation,
        Self::Tutorial,
        Self::SampleCode,
        Self::ReferenceManual,
    ];

    /// String representation used in persistence and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiDocumentation => "API Documentation",
            Self::UserGuide => "User Guide",
            Self::TechnicalSpecification => "Technical Specification",
            Self::CodeDocumentation => "Code Documentation",
            Self::Tutorial => "Tutorial",
            Self::SampleCode => "Sample Code",
            Self::ReferenceManual => "Reference Manual",
        }
    }
}

impl Display for DocumentationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for DocumentationType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!("documentation type: {value}"))
            })
    }
}

impl TryFrom<String> for DocumentationType {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<DocumentationType> for String {
    fn from(value: DocumentationType) -> Self {
        value.as_str().to_string()
    }
}
