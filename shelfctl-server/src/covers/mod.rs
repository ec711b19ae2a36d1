//! Cover image lookups against an external provider
//!
//! - `client`: outbound HTTP (`CoverSource` trait, Open Library client)
//! - `aggregate`: bounded, order-preserving bulk fan-out

pub mod aggregate;
pub mod client;
#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use crate::models::ValidationError;

pub use aggregate::{CoverAggregator, CoverConfig, FEATURED_ISBNS};
pub use client::{CoverSource, OpenLibraryCovers, DEFAULT_BASE_URL};

/// Cover lookup error
#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    #[error("cover request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cover provider returned status {status}")]
    Status { status: u16 },

    #[error("cover lookup timed out after {after:?}")]
    Timeout { after: Duration },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
