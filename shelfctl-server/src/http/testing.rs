//! Router test harness: in-memory books, scripted covers

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;

use super::server::{build_router, AppState, ServerConfig};
use crate::covers::testing::FakeCovers;
use crate::covers::{CoverAggregator, FEATURED_ISBNS};
use crate::db::MemoryBookStore;

pub struct TestApp {
    pub router: Router,
    pub books: Arc<MemoryBookStore>,
    pub covers: Arc<FakeCovers>,
}

impl TestApp {
    pub fn new() -> Self {
        let books = Arc::new(MemoryBookStore::new());
        let covers = Arc::new(FakeCovers::default());
        let state = AppState {
            books: books.clone(),
            covers: CoverAggregator::new(covers.clone(), 4, Duration::from_secs(5)),
            featured: FEATURED_ISBNS.iter().map(|s| s.to_string()).collect(),
        };
        let router = build_router(state, &ServerConfig::default());

        Self {
            router,
            books,
            covers,
        }
    }

    pub fn featured_len(&self) -> usize {
        FEATURED_ISBNS.len()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
