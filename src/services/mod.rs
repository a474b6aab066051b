//! Business logic services

pub mod authors;
pub mod books;

use std::sync::Arc;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorService,
    pub books: books::BookService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorService::new(Arc::new(repository.authors.clone())),
            books: books::BookService::new(Arc::new(repository.books.clone())),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
