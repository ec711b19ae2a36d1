//! Custom Axum extractors
//!
//! Both map rejections into `ApiError` so malformed input still gets the
//! structured error body.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Form;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{BookId, ValidationError};

/// Extract a book id from the path.
///
/// A non-numeric id cannot name a stored book, so it is a 404.
pub struct BookIdPath(pub BookId);

impl<S> FromRequestParts<S> for BookIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = raw
            .trim()
            .parse::<BookId>()
            .map_err(|_| ApiError::book_not_found(&raw))?;

        Ok(Self(id))
    }
}

/// urlencoded form body with a structured rejection
pub struct ValidForm<T>(pub T);

impl<S, T> FromRequest<S> for ValidForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "form rejected");
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "form",
                reason: "expected a urlencoded form with valid fields",
            })
        })?;

        Ok(Self(value))
    }
}
