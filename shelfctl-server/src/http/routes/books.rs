//! Book list pages and form handlers
//!
//! Reads render HTML; writes answer with a 303 back to the list.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{BookIdPath, ValidForm};
use crate::http::server::AppState;
use crate::http::views;
use crate::models::{BookFields, BookForm, DeleteForm};

/// GET / - list every book
async fn list_books(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let books = state.books.list_all().await?;
    Ok(Html(views::index(views::LIST_TITLE, &books)))
}

/// GET /edit/{id} - edit form for one book
async fn edit_form(
    State(state): State<Arc<AppState>>,
    BookIdPath(id): BookIdPath,
) -> Result<Html<String>, ApiError> {
    let book = state
        .books
        .get(id)
        .await?
        .ok_or_else(|| ApiError::book_not_found(id))?;

    Ok(Html(views::edit(&book)))
}

/// POST /add - create a book
async fn add_book(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<BookForm>,
) -> Result<Redirect, ApiError> {
    let fields = BookFields::try_from(form)?;
    let book = state.books.insert(fields).await?;
    tracing::info!(id = book.id, title = %book.title, "book added");

    Ok(Redirect::to("/"))
}

/// POST /edit/{id} - overwrite a book
async fn update_book(
    State(state): State<Arc<AppState>>,
    BookIdPath(id): BookIdPath,
    ValidForm(form): ValidForm<BookForm>,
) -> Result<Redirect, ApiError> {
    let fields = BookFields::try_from(form)?;
    let affected = state.books.update(id, fields).await?;
    if affected == 0 {
        tracing::debug!(id, "update matched no book");
    } else {
        tracing::info!(id, "book updated");
    }

    Ok(Redirect::to("/"))
}

/// POST /delete - remove a book
async fn delete_book(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<DeleteForm>,
) -> Result<Redirect, ApiError> {
    let id = form.delete_book_id;
    let affected = state.books.delete(id).await?;
    tracing::info!(id, affected, "book deleted");

    Ok(Redirect::to("/"))
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_books))
        .route("/add", post(add_book))
        .route("/edit/{id}", get(edit_form).post(update_book))
        .route("/delete", post(delete_book))
}
