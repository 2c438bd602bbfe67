use serde::Deserialize;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryId, CategoryName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryForm {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(range(min = 1, message = "Parent category id must be positive"))]
    pub parent_category_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryFormPayload {
    pub name: CategoryName,
    pub parent_id: Option<CategoryId>,
}

impl CreateCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name,
            parent_id: self.parent_id,
        }
    }
}

impl TryFrom<CreateCategoryForm> for CreateCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: CreateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: CategoryName::new(value.name)?,
            parent_id: value.parent_category_id.map(CategoryId::new).transpose()?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub name: CategoryName,
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: CategoryName::new(value.name)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RearrangeCategoryForm {
    #[validate(range(min = 0, message = "Position cannot be negative"))]
    pub new_position: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RearrangeCategoryFormPayload {
    pub new_position: i32,
}

impl TryFrom<RearrangeCategoryForm> for RearrangeCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: RearrangeCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            new_position: value.new_position,
        })
    }
}
