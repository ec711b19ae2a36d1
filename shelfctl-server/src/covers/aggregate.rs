//! Bounded cover fan-out
//!
//! `fetch_all` keeps at most `concurrency` lookups in flight, gives each one
//! `timeout`, and yields results in input order (position `i` always belongs
//! to identifier `i`). A failed lookup becomes an empty placeholder; the
//! aggregate itself never fails.
//!
//! With `with_deadline`, the whole batch is also bounded: lookups still
//! running at the deadline, and any not yet started, become placeholders.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use futures::stream::{self, StreamExt};
use tokio::time::Instant;

use super::client::{CoverSource, OpenLibraryCovers, DEFAULT_BASE_URL};
use super::CoverError;
use crate::models::{CoverId, CoverLookupResult, CoverScheme, CoverSize};

/// Default maximum in-flight lookups per bulk request
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default per-lookup timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// ISBNs shown by `GET /covers/featured` unless overridden
pub const FEATURED_ISBNS: &[&str] = &[
    "2226177612",
    "9780143130727",
    "0451526538",
    "9781612680019",
    "9781410484406",
    "607011521X",
    "0002311178",
];

/// Cover lookup settings
#[derive(Debug, Clone)]
pub struct CoverConfig {
    /// Provider base URL (default: https://covers.openlibrary.org)
    pub base_url: String,
    /// Maximum in-flight lookups per bulk request
    pub concurrency: usize,
    /// Per-lookup timeout
    pub timeout: Duration,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fans cover lookups out to a `CoverSource`
#[derive(Clone)]
pub struct CoverAggregator {
    source: Arc<dyn CoverSource>,
    concurrency: usize,
    timeout: Duration,
    deadline: Option<Duration>,
}

impl CoverAggregator {
    pub fn new(source: Arc<dyn CoverSource>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
            timeout,
            deadline: None,
        }
    }

    /// Bound every `fetch_all` call to `deadline` in total.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Aggregator backed by the Open Library client.
    pub fn from_config(config: &CoverConfig) -> Self {
        let source = Arc::new(OpenLibraryCovers::new(config.base_url.clone()));
        Self::new(source, config.concurrency, config.timeout)
    }

    /// Single lookup with timeout. Inputs are already validated.
    pub async fn fetch_one(
        &self,
        scheme: CoverScheme,
        identifier: &CoverId,
        size: CoverSize,
    ) -> Result<Bytes, CoverError> {
        match tokio::time::timeout(self.timeout, self.source.fetch(scheme, identifier, size)).await
        {
            Ok(result) => result,
            Err(_) => Err(CoverError::Timeout {
                after: self.timeout,
            }),
        }
    }

    /// Bulk lookup. Always returns one result per identifier, in order.
    pub async fn fetch_all<I, S>(
        &self,
        scheme: CoverScheme,
        identifiers: I,
        size: CoverSize,
    ) -> Vec<CoverLookupResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let started = Instant::now();
        let cutoff = self.deadline.map(|budget| started + budget);

        stream::iter(identifiers.into_iter().map(Into::into))
            .map(|raw: String| async move {
                let result = match CoverId::new(&raw) {
                    Ok(id) => self.fetch_before(cutoff, scheme, &id, size).await,
                    Err(e) => Err(CoverError::from(e)),
                };

                match result {
                    Ok(bytes) => CoverLookupResult::found(raw, &bytes),
                    Err(e) => {
                        tracing::warn!(identifier = %raw, error = %e, "cover lookup failed");
                        CoverLookupResult::missing(raw)
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn fetch_before(
        &self,
        cutoff: Option<Instant>,
        scheme: CoverScheme,
        identifier: &CoverId,
        size: CoverSize,
    ) -> Result<Bytes, CoverError> {
        let Some(cutoff) = cutoff else {
            return self.fetch_one(scheme, identifier, size).await;
        };

        let budget = self.deadline.unwrap_or_default();
        if Instant::now() >= cutoff {
            return Err(CoverError::Timeout { after: budget });
        }
        match tokio::time::timeout_at(cutoff, self.fetch_one(scheme, identifier, size)).await {
            Ok(result) => result,
            Err(_) => Err(CoverError::Timeout { after: budget }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covers::testing::FakeCovers;

    fn aggregator(fake: Arc<FakeCovers>, concurrency: usize) -> CoverAggregator {
        CoverAggregator::new(fake, concurrency, Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn failures_become_placeholders_in_place() {
        let fake = Arc::new(FakeCovers::default());
        let covers = aggregator(fake.clone(), 4);

        let ids = ["111", "fail-1", "222", "fail-2", "333"];
        let results = covers
            .fetch_all(CoverScheme::Isbn, ids, CoverSize::Large)
            .await;

        assert_eq!(results.len(), ids.len());
        for (result, id) in results.iter().zip(ids) {
            assert_eq!(result.identifier, id);
            assert_eq!(result.is_missing(), id.starts_with("fail"), "{id}");
        }
        assert_eq!(
            results[0],
            CoverLookupResult::found("111", FakeCovers::image_for("111").as_ref())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn order_follows_input_not_completion() {
        let fake = Arc::new(FakeCovers::default());
        let covers = aggregator(fake.clone(), 8);

        // Earlier identifiers finish last
        let ids = ["slow-300", "slow-200", "slow-100", "fast"];
        let results = covers
            .fetch_all(CoverScheme::Isbn, ids, CoverSize::Medium)
            .await;

        let got: Vec<&str> = results.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(got, ids);
        assert!(results.iter().all(|r| !r.is_missing()));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_lookup_is_placeholder() {
        let fake = Arc::new(FakeCovers::default());
        let covers = CoverAggregator::new(fake.clone(), 2, Duration::from_millis(500));

        let results = covers
            .fetch_all(CoverScheme::Isbn, ["slow-60000", "111"], CoverSize::Small)
            .await;

        assert!(results[0].is_missing());
        assert!(!results[1].is_missing());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrency_is_capped() {
        let fake = Arc::new(FakeCovers::default());
        let covers = aggregator(fake.clone(), 2);

        let ids: Vec<String> = (0..7).map(|i| format!("slow-{}", 50 + i)).collect();
        let results = covers
            .fetch_all(CoverScheme::Isbn, ids, CoverSize::Large)
            .await;

        assert_eq!(results.len(), 7);
        assert_eq!(fake.calls(), 7);
        assert_eq!(fake.max_in_flight(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_count_recovers_after_timeout() {
        let fake = Arc::new(FakeCovers::default());
        let covers = CoverAggregator::new(fake.clone(), 1, Duration::from_millis(100));

        let results = covers
            .fetch_all(CoverScheme::Isbn, ["slow-60000", "slow-10"], CoverSize::Large)
            .await;

        assert!(results[0].is_missing());
        assert!(!results[1].is_missing());
        assert_eq!(fake.in_flight(), 0);
        assert_eq!(fake.max_in_flight(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_fills_unfinished_positions() {
        let fake = Arc::new(FakeCovers::default());
        let covers = CoverAggregator::new(fake.clone(), 2, Duration::from_secs(5))
            .with_deadline(Duration::from_secs(12));

        let mut ids: Vec<String> = vec!["111".into()];
        ids.extend((0..9).map(|_| "slow-600000".to_string()));

        let started = Instant::now();
        let results = covers.fetch_all(CoverScheme::Isbn, ids, CoverSize::Large).await;

        assert!(started.elapsed() <= Duration::from_secs(12));
        assert_eq!(results.len(), 10);
        assert!(!results[0].is_missing());
        assert!(results[1..].iter().all(|r| r.is_missing()));
        // later positions were never sent upstream
        assert!(fake.calls() < 10);
    }

    #[tokio::test]
    async fn timeout_error_keeps_sub_second_precision() {
        let err = CoverError::Timeout {
            after: Duration::from_millis(500),
        };
        assert_eq!(err.to_string(), "cover lookup timed out after 500ms");
    }

    #[tokio::test]
    async fn invalid_identifier_skips_outbound_call() {
        let fake = Arc::new(FakeCovers::default());
        let covers = aggregator(fake.clone(), 2);

        let results = covers
            .fetch_all(CoverScheme::Isbn, ["../x", "111"], CoverSize::Large)
            .await;

        assert!(results[0].is_missing());
        assert!(!results[1].is_missing());
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn empty_input_is_empty_output() {
        let fake = Arc::new(FakeCovers::default());
        let covers = aggregator(fake.clone(), 2);

        let results = covers
            .fetch_all(CoverScheme::Isbn, Vec::<String>::new(), CoverSize::Large)
            .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn fetch_one_surfaces_upstream_status() {
        let fake = Arc::new(FakeCovers::default());
        let covers = aggregator(fake, 1);
        let id = CoverId::new("fail-404").unwrap();

        let err = covers
            .fetch_one(CoverScheme::Isbn, &id, CoverSize::Large)
            .await
            .unwrap_err();
        assert!(matches!(err, CoverError::Status { status: 404 }));
    }
}
