// src/fetch/memory.rs
// =============================================================================
// A fetcher that serves pages from memory and counts every request.
//
// Only compiled for tests. It lets the scheduler tests check exactly which
// addresses were fetched and how often, without touching the network.
// =============================================================================

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

use super::{FetchError, Fetcher};

#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<Url, String>,
    failing: HashMap<Url, u16>,
    hits: DashMap<Url, usize>,
    delay: Option<Duration>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // Serves `html` at `address`
    pub fn page(mut self, address: &str, html: &str) -> Self {
        self.pages.insert(url(address), html.to_string());
        self
    }

    // Answers `address` with the given HTTP status
    pub fn failing(mut self, address: &str, status: u16) -> Self {
        self.failing.insert(url(address), status);
        self
    }

    // Sleeps before every answer, to keep workers in flight for a while
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    // How many times `address` was requested
    pub fn hits(&self, address: &str) -> usize {
        self.hits.get(&url(address)).map(|n| *n).unwrap_or(0)
    }

    // Total number of requests across all addresses
    pub fn total_hits(&self) -> usize {
        self.hits.iter().map(|entry| *entry.value()).sum()
    }

    // Highest number of fetches that were running at the same time
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    // Every address that was requested at least once
    pub fn fetched(&self) -> Vec<String> {
        let mut fetched: Vec<String> = self.hits.iter().map(|e| e.key().to_string()).collect();
        fetched.sort();
        fetched
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, address: &Url) -> Result<Vec<u8>, FetchError> {
        *self.hits.entry(address.clone()).or_insert(0) += 1;

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        if let Some(status) = self.failing.get(address) {
            return Err(FetchError::Status { status: *status });
        }

        self.pages
            .get(address)
            .map(|html| html.clone().into_bytes())
            // unknown pages look like an HTTP 404, as HttpFetcher reports them
            .ok_or(FetchError::Status { status: 404 })
    }
}

fn url(address: &str) -> Url {
    Url::parse(address).expect("test addresses must be absolute URLs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_address_is_not_found() {
        let fetcher = StaticFetcher::new().page("http://test/", "<p>home</p>");

        let err = fetcher.fetch(&url("http://test/missing")).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404 }));
        assert_eq!(fetcher.hits("http://test/missing"), 1);
    }

    #[tokio::test]
    async fn test_failing_status_wins_over_page() {
        let fetcher = StaticFetcher::new()
            .page("http://test/", "<p>home</p>")
            .failing("http://test/", 500);

        let err = fetcher.fetch(&url("http://test/")).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 500 }));
    }
}
