//! Book model, request payloads and the flat join row used to rebuild author lists

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{author::CreateAuthor, validate_not_blank, validate_price};

/// Book with the names of its linked authors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub publish_status: bool,
    /// Derived from `book_author`, ordered by author creation
    #[serde(rename = "author")]
    pub authors: Vec<String>,
}

/// One row of `books LEFT JOIN book_author LEFT JOIN authors`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookAuthorRow {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub published_status: bool,
    pub author_name: Option<String>,
}

/// Book query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Only books having an author with exactly this name
    pub author: Option<String>,
}

/// Create book request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(custom(function = "validate_not_blank", message = "title must not be blank"))]
    pub title: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub publish_status: bool,
    #[serde(rename = "author", alias = "authors")]
    #[validate(length(min = 1, message = "at least one author required"), nested)]
    pub authors: Vec<CreateAuthor>,
}

/// Update book request. Absent fields are left unchanged; a non-empty
/// `authors` list replaces every existing author link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(custom(function = "validate_not_blank", message = "title must not be blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    pub publish_status: Option<bool>,
    #[serde(rename = "author", alias = "authors")]
    #[validate(nested)]
    pub authors: Option<Vec<CreateAuthor>>,
}

impl UpdateBook {
    /// Authors that should replace the current links, empty when untouched
    pub fn replacement_authors(&self) -> &[CreateAuthor] {
        self.authors.as_deref().unwrap_or_default()
    }

    pub fn patch(&self) -> BookPatch {
        BookPatch {
            title: self.title.clone(),
            price: self.price,
            publish_status: self.publish_status,
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.patch().is_empty() || !self.replacement_authors().is_empty()
    }
}

/// Set of scalar book columns to overwrite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub publish_status: Option<bool>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.price.is_none() && self.publish_status.is_none()
    }
}
