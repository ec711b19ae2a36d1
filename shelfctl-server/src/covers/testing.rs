//! Scripted cover source for tests
//!
//! Behaviour is keyed off the identifier:
//! - `fail...` answers upstream 404
//! - `slow-<ms>` sleeps `<ms>` milliseconds, then succeeds
//! - anything else succeeds immediately

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;

use super::{CoverError, CoverSource};
use crate::models::{CoverId, CoverScheme, CoverSize};

#[derive(Default)]
pub struct FakeCovers {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeCovers {
    pub fn image_for(identifier: &str) -> Bytes {
        Bytes::from(format!("jpeg:{identifier}"))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight count even when a timeout drops the lookup.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CoverSource for FakeCovers {
    async fn fetch(
        &self,
        _scheme: CoverScheme,
        identifier: &CoverId,
        _size: CoverSize,
    ) -> Result<Bytes, CoverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let id = identifier.as_str();
        if id.starts_with("fail") {
            return Err(CoverError::Status { status: 404 });
        }
        if let Some(ms) = id.strip_prefix("slow-").and_then(|ms| ms.parse().ok()) {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        Ok(Self::image_for(id))
    }
}
