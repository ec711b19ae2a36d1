//! Book repository backed by PostgreSQL
//!
//! Every statement binds its inputs (`$1..$n`); nothing user-supplied is
//! ever formatted into SQL text.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{BookStore, DbError};
use crate::models::{Book, BookFields, BookId};

/// PostgreSQL book store
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, rating, recency, notes, isbn
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, DbError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, rating, recency, notes, isbn
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Single round trip: INSERT ... RETURNING gives back the assigned id.
    async fn insert(&self, fields: BookFields) -> Result<Book, DbError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, rating, recency, notes, isbn)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, author, rating, recency, notes, isbn
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.author)
        .bind(fields.rating)
        .bind(fields.recency)
        .bind(&fields.notes)
        .bind(&fields.isbn)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    async fn update(&self, id: BookId, fields: BookFields) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author = $2, rating = $3, recency = $4, notes = $5, isbn = $6
            WHERE id = $7
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.author)
        .bind(fields.rating)
        .bind(fields.recency)
        .bind(&fields.notes)
        .bind(&fields.isbn)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: BookId) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_isbns(&self) -> Result<Vec<String>, DbError> {
        let isbns = sqlx::query_scalar::<_, String>(
            r#"
            SELECT isbn
            FROM books
            WHERE isbn IS NOT NULL AND isbn <> ''
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(isbns)
    }
}
