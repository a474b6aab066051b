//! Books repository for database operations.
//!
//! Multi-statement writes run inside one explicit transaction; an early
//! return drops the `Transaction`, which rolls it back. Author lists are
//! rebuilt application-side from the flat `books ⋈ book_author ⋈ authors`
//! rows rather than with a string aggregate.

use async_trait::async_trait;
use sqlx::{PgConnection, Pool, Postgres, QueryBuilder};

use super::authors::insert_author;
use crate::{
    error::{AppResult, StorageContext},
    models::{
        author::CreateAuthor,
        book::{Book, BookAuthorRow, BookPatch, CreateBook},
    },
};

/// Persistence operations on `books` and the `book_author` links
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Every book, including books without any linked author.
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    /// Books having an author named exactly `author_name`, each with its
    /// complete author list.
    async fn find_all_by_author(&self, author_name: &str) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// Inserts the book, one fresh author row per entry and the links,
    /// atomically. Returns the generated book id.
    async fn insert(&self, book: &CreateBook) -> AppResult<i64>;

    /// Overwrites the scalar fields present in `patch`. A non-empty
    /// `authors` slice replaces every existing link; an empty one leaves
    /// links untouched.
    async fn update(&self, id: i64, patch: &BookPatch, authors: &[CreateAuthor]) -> AppResult<()>;
}

/// Fold join rows into books. Rows must be ordered by book id so that
/// all rows of one book are contiguous; author order is kept as given.
pub(crate) fn group_book_rows(rows: Vec<BookAuthorRow>) -> Vec<Book> {
    let mut books: Vec<Book> = Vec::new();

    for row in rows {
        if let Some(book) = books.last_mut().filter(|book| book.id == row.id) {
            book.authors.extend(row.author_name);
            continue;
        }

        books.push(Book {
            id: row.id,
            title: row.title,
            price: row.price,
            publish_status: row.published_status,
            authors: row.author_name.into_iter().collect(),
        });
    }

    books
}

/// Build `UPDATE books SET ... WHERE id = $n` over the present fields.
fn update_book_query(id: i64, patch: &BookPatch) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new("UPDATE books SET ");
    let mut sets = builder.separated(", ");
    if let Some(ref title) = patch.title {
        sets.push("title = ").push_bind_unseparated(title.clone());
    }
    if let Some(price) = patch.price {
        sets.push("price = ").push_bind_unseparated(price);
    }
    if let Some(publish_status) = patch.publish_status {
        sets.push("published_status = ")
            .push_bind_unseparated(publish_status);
    }
    builder.push(" WHERE id = ").push_bind(id);

    Some(builder)
}

/// Create a fresh author row for every entry and link each one to the book.
/// Existing authors with the same name are never reused.
async fn link_new_authors(
    conn: &mut PgConnection,
    book_id: i64,
    authors: &[CreateAuthor],
) -> AppResult<()> {
    if authors.is_empty() {
        return Ok(());
    }

    let mut author_ids = Vec::with_capacity(authors.len());
    for author in authors {
        let created = insert_author(&mut *conn, &author.name, author.birth_date)
            .await
            .storage("insert book author")?;
        author_ids.push(created.id);
    }

    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO book_author (book_id, author_id) ");
    builder.push_values(&author_ids, |mut link, author_id| {
        link.push_bind(book_id).push_bind(*author_id);
    });
    builder
        .build()
        .execute(&mut *conn)
        .await
        .storage("link book authors")?;

    tracing::debug!(book_id, authors = author_ids.len(), "Linked new authors to book");
    Ok(())
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookAuthorRow>(
            r#"
            SELECT b.id, b.title, b.price, b.published_status, a.name AS author_name
            FROM books b
            LEFT JOIN book_author ba ON ba.book_id = b.id
            LEFT JOIN authors a ON a.id = ba.author_id
            ORDER BY b.id, a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .storage("list books")?;

        Ok(group_book_rows(rows))
    }

    async fn find_all_by_author(&self, author_name: &str) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookAuthorRow>(
            r#"
            SELECT b.id, b.title, b.price, b.published_status, a.name AS author_name
            FROM books b
            LEFT JOIN book_author ba ON ba.book_id = b.id
            LEFT JOIN authors a ON a.id = ba.author_id
            WHERE b.id IN (
                SELECT fba.book_id
                FROM book_author fba
                JOIN authors fa ON fa.id = fba.author_id
                WHERE fa.name = $1
            )
            ORDER BY b.id, a.id
            "#,
        )
        .bind(author_name)
        .fetch_all(&self.pool)
        .await
        .storage("list books by author")?;

        Ok(group_book_rows(rows))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let rows = sqlx::query_as::<_, BookAuthorRow>(
            r#"
            SELECT b.id, b.title, b.price, b.published_status, a.name AS author_name
            FROM books b
            LEFT JOIN book_author ba ON ba.book_id = b.id
            LEFT JOIN authors a ON a.id = ba.author_id
            WHERE b.id = $1
            ORDER BY a.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .storage("find book")?;

        Ok(group_book_rows(rows).into_iter().next())
    }

    async fn insert(&self, book: &CreateBook) -> AppResult<i64> {
        let mut tx = self.pool.begin().await.storage("begin book insert")?;

        let book_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO books (title, price, published_status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&book.title)
        .bind(book.price)
        .bind(book.publish_status)
        .fetch_one(&mut *tx)
        .await
        .storage("insert book")?;

        link_new_authors(&mut tx, book_id, &book.authors).await?;

        tx.commit().await.storage("commit book insert")?;
        tracing::debug!(book_id, authors = book.authors.len(), "Inserted book");
        Ok(book_id)
    }

    async fn update(&self, id: i64, patch: &BookPatch, authors: &[CreateAuthor]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.storage("begin book update")?;

        if let Some(mut builder) = update_book_query(id, patch) {
            builder
                .build()
                .execute(&mut *tx)
                .await
                .storage("update book")?;
        }

        if !authors.is_empty() {
            let removed = sqlx::query("DELETE FROM book_author WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .storage("unlink book authors")?;
            tracing::debug!(book_id = id, links = removed.rows_affected(), "Removed book author links");

            link_new_authors(&mut tx, id, authors).await?;
        }

        tx.commit().await.storage("commit book update")?;
        tracing::debug!(book_id = id, "Updated book");
        Ok(())
    }
}
