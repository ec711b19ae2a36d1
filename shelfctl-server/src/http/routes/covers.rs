//! Cover image endpoints
//!
//! - `GET /covers` - JSON covers for stored ISBNs (or `?isbns=a,b,c`)
//! - `GET /covers/featured` - JSON covers for the featured ISBN set
//! - `GET /covers/{scheme}/{identifier}/{size}` - raw image bytes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{CoverId, CoverLookupResult, CoverScheme, CoverSize};

/// Query parameters for the bulk endpoint
#[derive(Debug, Default, Deserialize)]
pub struct BulkCoverParams {
    /// Comma-separated ISBNs; stored ISBNs are used when absent
    pub isbns: Option<String>,
    /// S, M or L (default L)
    pub size: Option<String>,
}

fn parse_size(size: Option<&str>) -> Result<CoverSize, ApiError> {
    match size {
        Some(s) => Ok(s.parse::<CoverSize>()?),
        None => Ok(CoverSize::default()),
    }
}

/// GET /covers
async fn bulk_covers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BulkCoverParams>,
) -> Result<Json<Vec<CoverLookupResult>>, ApiError> {
    let size = parse_size(params.size.as_deref())?;

    let identifiers: Vec<String> = match params.isbns {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        None => state.books.list_isbns().await?,
    };

    tracing::debug!(count = identifiers.len(), %size, "bulk cover lookup");
    let covers = state
        .covers
        .fetch_all(CoverScheme::Isbn, identifiers, size)
        .await;

    Ok(Json(covers))
}

/// GET /covers/featured
async fn featured_covers(State(state): State<Arc<AppState>>) -> Json<Vec<CoverLookupResult>> {
    let covers = state
        .covers
        .fetch_all(CoverScheme::Isbn, state.featured.clone(), CoverSize::Large)
        .await;

    Json(covers)
}

/// GET /covers/{scheme}/{identifier}/{size}
///
/// Selectors are validated before any outbound request is made.
async fn single_cover(
    State(state): State<Arc<AppState>>,
    Path((scheme, identifier, size)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let scheme: CoverScheme = scheme.parse().map_err(ApiError::cover_not_found)?;
    let size: CoverSize = size.parse().map_err(ApiError::cover_not_found)?;
    let identifier = CoverId::new(&identifier).map_err(ApiError::cover_not_found)?;

    let bytes = state.covers.fetch_one(scheme, &identifier, size).await?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}

/// Cover routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/covers", get(bulk_covers))
        .route("/covers/featured", get(featured_covers))
        .route("/covers/{scheme}/{identifier}/{size}", get(single_cover))
}
