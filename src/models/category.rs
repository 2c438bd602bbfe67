use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::domain::types::{
    CategoryId, CategoryName, CategoryPath, CategoryPosition, TypeConstraintError,
};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub position: i32,
    pub path: String,
}

/// Insertable form of [`Category`].
///
/// Position and path are placeholders until the tree attaches the row.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub parent_id: Option<i32>,
    pub position: i32,
    pub path: &'a str,
}

/// Full structural state written back after a tree mutation.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories, treat_none_as_null = true)]
pub struct CategoryChangeset<'a> {
    pub name: &'a str,
    pub parent_id: Option<i32>,
    pub position: i32,
    pub path: &'a str,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            parent_id: category.parent_id.map(CategoryId::new).transpose()?,
            position: CategoryPosition::new(category.position)?,
            path: CategoryPath::try_from(category.path)?,
            subcategories: Vec::new(),
            artifacts: Vec::new(),
        })
    }
}

impl<'a> From<&'a DomainCategory> for CategoryChangeset<'a> {
    fn from(category: &'a DomainCategory) -> Self {
        Self {
            name: category.name.as_str(),
            parent_id: category.parent_id.map(CategoryId::get),
            position: category.position.get(),
            path: category.path.as_str(),
        }
    }
}
