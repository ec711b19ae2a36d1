//! In-process book store
//!
//! Same contract as `PgBookStore`: ids are assigned monotonically and never
//! reused, listing is ascending by id, and update/delete of an unknown id
//! affect zero rows.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, DbError};
use crate::models::{Book, BookFields, BookId};

#[derive(Default)]
struct Inner {
    last_id: BookId,
    rows: BTreeMap<BookId, Book>,
}

/// Book store held in memory
#[derive(Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, DbError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, DbError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn insert(&self, fields: BookFields) -> Result<Book, DbError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let book = Book::from_fields(inner.last_id, fields);
        inner.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: BookId, fields: BookFields) -> Result<u64, DbError> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(row) => {
                *row = Book::from_fields(id, fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: BookId) -> Result<u64, DbError> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn list_isbns(&self) -> Result<Vec<String>, DbError> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter_map(|b| b.isbn.clone())
            .filter(|isbn| !isbn.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, isbn: Option<&str>) -> BookFields {
        BookFields {
            title: title.into(),
            author: "Someone".into(),
            rating: 3,
            recency: None,
            notes: None,
            isbn: isbn.map(Into::into),
        }
    }

    #[tokio::test]
    async fn insert_assigns_unique_ascending_ids() {
        let store = MemoryBookStore::new();
        let a = store.insert(fields("A", None)).await.unwrap();
        let b = store.insert(fields("B", None)).await.unwrap();
        store.delete(b.id).await.unwrap();
        let c = store.insert(fields("C", None)).await.unwrap();

        assert!(a.id < b.id && b.id < c.id, "ids must never be reused");

        let ids: Vec<BookId> = store.list_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn update_touches_only_target_row() {
        let store = MemoryBookStore::new();
        let a = store.insert(fields("A", None)).await.unwrap();
        let b = store.insert(fields("B", None)).await.unwrap();

        let affected = store.update(a.id, fields("A2", Some("123"))).await.unwrap();
        assert_eq!(affected, 1);

        let a2 = store.get(a.id).await.unwrap().unwrap();
        assert_eq!(a2.title, "A2");
        assert_eq!(a2.isbn.as_deref(), Some("123"));
        assert_eq!(store.get(b.id).await.unwrap().unwrap(), b);
    }

    #[tokio::test]
    async fn update_missing_id_affects_nothing() {
        let store = MemoryBookStore::new();
        assert_eq!(store.update(42, fields("X", None)).await.unwrap(), 0);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_silent_for_missing_id() {
        let store = MemoryBookStore::new();
        let a = store.insert(fields("A", None)).await.unwrap();

        assert_eq!(store.delete(a.id).await.unwrap(), 1);
        assert!(store.get(a.id).await.unwrap().is_none());
        assert_eq!(store.delete(a.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_isbns_skips_missing() {
        let store = MemoryBookStore::new();
        store.insert(fields("A", Some("111"))).await.unwrap();
        store.insert(fields("B", None)).await.unwrap();
        store.insert(fields("C", Some("333"))).await.unwrap();

        assert_eq!(store.list_isbns().await.unwrap(), vec!["111", "333"]);
    }
}
