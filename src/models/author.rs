//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{validate_not_blank, validate_past_date};

/// Author row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "birthdate")]
    pub birth_date: NaiveDate,
}

/// Create author request, also used for the author list of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    #[validate(custom(function = "validate_not_blank", message = "author name must not be blank"))]
    pub name: String,
    #[validate(custom(function = "validate_past_date", message = "author birthDate must be in the past"))]
    pub birth_date: NaiveDate,
}

/// Update author request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    #[validate(custom(function = "validate_not_blank", message = "author name must not be blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_past_date", message = "author birthDate must be in the past"))]
    pub birth_date: Option<NaiveDate>,
}

/// Set of author columns to overwrite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl AuthorPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.birth_date.is_none()
    }
}

impl From<UpdateAuthor> for AuthorPatch {
    fn from(data: UpdateAuthor) -> Self {
        Self {
            name: data.name,
            birth_date: data.birth_date,
        }
    }
}
