//! Repository implementations for the `books` table
//!
//! Handlers only see the `BookStore` trait:
//! - `PgBookStore` issues parameterized SQL against PostgreSQL
//! - `MemoryBookStore` keeps rows in process (tests, `serve --memory`)
//!
//! Neither implementation retries or translates storage failures.

pub mod books;
pub mod memory;

use async_trait::async_trait;

use crate::models::{Book, BookFields, BookId};

pub use books::PgBookStore;
pub use memory::MemoryBookStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration {version} failed: {source}")]
    Migration {
        version: i32,
        #[source]
        source: sqlx::Error,
    },
}

/// Data access for books
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Every book, ascending by id.
    async fn list_all(&self) -> Result<Vec<Book>, DbError>;

    /// A single book, or `None` if the id is unknown.
    async fn get(&self, id: BookId) -> Result<Option<Book>, DbError>;

    /// Insert a book and return it with its storage-assigned id.
    async fn insert(&self, fields: BookFields) -> Result<Book, DbError>;

    /// Overwrite all mutable fields. Returns rows affected (0 if absent).
    async fn update(&self, id: BookId, fields: BookFields) -> Result<u64, DbError>;

    /// Remove a book. Returns rows affected (0 if absent).
    async fn delete(&self, id: BookId) -> Result<u64, DbError>;

    /// Every non-empty stored ISBN, ordered by book id.
    async fn list_isbns(&self) -> Result<Vec<String>, DbError>;
}
