// src/fetch/mod.rs
// =============================================================================
// This module retrieves raw page content.
//
// Submodules:
// - http: the real fetcher, backed by reqwest
// - memory: an in-memory fetcher used by the tests
//
// The crawl engine only talks to the Fetcher trait, so tests can swap the
// network out for a fixed set of pages and count every request.
// =============================================================================

mod http;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use url::Url;

pub use http::HttpFetcher;

// Everything that can go wrong while downloading one page
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network, TLS, timeout or body read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status}")]
    Status { status: u16 },
}

// Anything that can turn an address into the bytes of a page.
//
// Implementations must be shareable between workers (Send + Sync); the
// scheduler holds one behind an Arc for the whole run.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, address: &Url) -> Result<Vec<u8>, FetchError>;
}
