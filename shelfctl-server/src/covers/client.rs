//! Open Library covers client
//!
//! Thin wrapper over `reqwest` that turns a validated
//! (scheme, identifier, size) triple into image bytes.

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, StatusCode};

use super::CoverError;
use crate::models::{CoverId, CoverScheme, CoverSize};

/// Default cover provider
pub const DEFAULT_BASE_URL: &str = "https://covers.openlibrary.org";

/// Anything that can produce cover image bytes
#[async_trait]
pub trait CoverSource: Send + Sync {
    async fn fetch(
        &self,
        scheme: CoverScheme,
        identifier: &CoverId,
        size: CoverSize,
    ) -> Result<Bytes, CoverError>;
}

/// Open Library covers API client
pub struct OpenLibraryCovers {
    client: Client,
    base_url: String,
}

impl OpenLibraryCovers {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    /// Build the image URL.
    ///
    /// `default=false` makes the provider answer 404 for unknown identifiers
    /// instead of serving a blank placeholder.
    pub fn cover_url(&self, scheme: CoverScheme, identifier: &CoverId, size: CoverSize) -> String {
        format!(
            "{}/b/{}/{}-{}.jpg?default=false",
            self.base_url,
            scheme,
            identifier.as_str(),
            size
        )
    }
}

impl Default for OpenLibraryCovers {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CoverSource for OpenLibraryCovers {
    async fn fetch(
        &self,
        scheme: CoverScheme,
        identifier: &CoverId,
        size: CoverSize,
    ) -> Result<Bytes, CoverError> {
        let url = self.cover_url(scheme, identifier, size);
        tracing::debug!(%url, "fetching cover");

        let response = self.client.get(&url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(CoverError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_provider_url() {
        let covers = OpenLibraryCovers::new("https://covers.example.org/");
        let id = CoverId::new("9780441013593").unwrap();

        assert_eq!(
            covers.cover_url(CoverScheme::Isbn, &id, CoverSize::Large),
            "https://covers.example.org/b/isbn/9780441013593-L.jpg?default=false"
        );
        assert_eq!(
            covers.cover_url(CoverScheme::Olid, &id, CoverSize::Small),
            "https://covers.example.org/b/olid/9780441013593-S.jpg?default=false"
        );
    }

    #[test]
    fn default_points_at_open_library() {
        let covers = OpenLibraryCovers::default();
        let id = CoverId::new("1").unwrap();
        assert!(covers
            .cover_url(CoverScheme::Isbn, &id, CoverSize::Medium)
            .starts_with(DEFAULT_BASE_URL));
    }
}
