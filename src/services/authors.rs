//! Author management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorPatch, CreateAuthor, UpdateAuthor},
    repository::AuthorStore,
};

#[derive(Clone)]
pub struct AuthorService {
    store: Arc<dyn AuthorStore>,
}

impl AuthorService {
    pub fn new(store: Arc<dyn AuthorStore>) -> Self {
        Self { store }
    }

    /// List all authors
    pub async fn get_authors(&self) -> AppResult<Vec<Author>> {
        self.store.find_all().await
    }

    /// Get author by ID
    pub async fn get_author(&self, id: i64) -> AppResult<Author> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    pub async fn insert_author(&self, data: &CreateAuthor) -> AppResult<Author> {
        let author = self.store.insert(&data.name, data.birth_date).await?;
        tracing::info!(author_id = author.id, "Author created");
        Ok(author)
    }

    /// Update the supplied fields of an author and return the stored result.
    /// An update without any field is rejected before touching the store.
    pub async fn update_author(&self, id: i64, data: UpdateAuthor) -> AppResult<Author> {
        let patch = AuthorPatch::from(data);
        if patch.is_empty() {
            tracing::warn!(author_id = id, "Rejected empty author update");
            return Err(AppError::BadRequest(
                "Author update request must contain at least one valid field".to_string(),
            ));
        }

        self.get_author(id).await?;

        self.store.update(id, &patch).await?;

        let author = self.store.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(format!("Author {} missing after update", id))
        })?;
        tracing::info!(author_id = id, "Author updated");
        Ok(author)
    }
}
