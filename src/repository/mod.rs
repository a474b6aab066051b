//! Repository layer for database operations

pub mod authors;
pub mod books;

use sqlx::{Pool, Postgres};

use crate::error::{AppResult, StorageContext};

pub use authors::{AuthorStore, AuthorsRepository};
pub use books::{BookStore, BooksRepository};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: AuthorsRepository,
    pub books: BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: AuthorsRepository::new(pool.clone()),
            books: BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round trip to the database, used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .storage("ping")?;
        Ok(())
    }
}
