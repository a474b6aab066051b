//! Book catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::BookStore,
};

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// List books, optionally restricted to those written by `author`
    pub async fn get_books(&self, author: Option<&str>) -> AppResult<Vec<Book>> {
        match author {
            Some(name) => self.store.find_all_by_author(name).await,
            None => self.store.find_all().await,
        }
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Register a book together with freshly created authors
    pub async fn insert_book(&self, data: &CreateBook) -> AppResult<Book> {
        let id = self.store.insert(data).await?;

        let book = self.store.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(format!("Book {} missing after insert", id))
        })?;
        tracing::info!(book_id = id, authors = book.authors.len(), "Book created");
        Ok(book)
    }

    /// Update an existing book.
    ///
    /// Rejected with `BadRequest`, before any write, when the request
    /// carries no field or tries to unpublish a published book.
    pub async fn update_book(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        if !data.has_changes() {
            tracing::warn!(book_id = id, "Rejected empty book update");
            return Err(AppError::BadRequest(
                "Book update request must contain at least one valid field".to_string(),
            ));
        }

        let current = self.get_book(id).await?;
        if current.publish_status && data.publish_status == Some(false) {
            tracing::warn!(book_id = id, "Rejected unpublishing a published book");
            return Err(AppError::BadRequest(
                "A published book cannot be unpublished".to_string(),
            ));
        }

        self.store
            .update(id, &data.patch(), data.replacement_authors())
            .await?;

        let book = self.store.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(format!("Book {} missing after update", id))
        })?;
        tracing::info!(book_id = id, "Book updated");
        Ok(book)
    }
}
