//! Authors repository for database operations

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgExecutor, Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppResult, StorageContext},
    models::author::{Author, AuthorPatch},
};

/// Persistence operations on the `authors` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Returns `None` when no row has this id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>>;

    /// Full scan, order unspecified.
    async fn find_all(&self) -> AppResult<Vec<Author>>;

    async fn insert(&self, name: &str, birth_date: NaiveDate) -> AppResult<Author>;

    /// Overwrites only the fields present in `patch`. Does not report
    /// whether a row matched.
    async fn update(&self, id: i64, patch: &AuthorPatch) -> AppResult<()>;
}

/// Insert one author row on any executor, including an open transaction.
pub(crate) async fn insert_author<'e, E>(
    executor: E,
    name: &str,
    birth_date: NaiveDate,
) -> Result<Author, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Author>(
        "INSERT INTO authors (name, birthdate) VALUES ($1, $2) RETURNING id, name, birthdate",
    )
    .bind(name)
    .bind(birth_date)
    .fetch_one(executor)
    .await
}

/// Build `UPDATE authors SET ... WHERE id = $n` over the present fields.
/// Returns `None` for an empty patch so no statement is sent at all.
fn update_author_query(id: i64, patch: &AuthorPatch) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new("UPDATE authors SET ");
    let mut sets = builder.separated(", ");
    if let Some(ref name) = patch.name {
        sets.push("name = ").push_bind_unseparated(name.clone());
    }
    if let Some(birth_date) = patch.birth_date {
        sets.push("birthdate = ").push_bind_unseparated(birth_date);
    }
    builder.push(" WHERE id = ").push_bind(id);

    Some(builder)
}

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>> {
        sqlx::query_as::<_, Author>("SELECT id, name, birthdate FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .storage("find author")
    }

    async fn find_all(&self) -> AppResult<Vec<Author>> {
        sqlx::query_as::<_, Author>("SELECT id, name, birthdate FROM authors")
            .fetch_all(&self.pool)
            .await
            .storage("list authors")
    }

    async fn insert(&self, name: &str, birth_date: NaiveDate) -> AppResult<Author> {
        let author = insert_author(&self.pool, name, birth_date)
            .await
            .storage("insert author")?;
        tracing::debug!(author_id = author.id, "Inserted author");
        Ok(author)
    }

    async fn update(&self, id: i64, patch: &AuthorPatch) -> AppResult<()> {
        let Some(mut builder) = update_author_query(id, patch) else {
            tracing::debug!(author_id = id, "Empty author patch, skipping update");
            return Ok(());
        };

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .storage("update author")?;
        tracing::debug!(author_id = id, rows = result.rows_affected(), "Updated author");
        Ok(())
    }
}
