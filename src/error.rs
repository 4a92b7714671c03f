// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// There are two families of errors:
// - CrawlError: problems with the run as a whole (bad seed, bad config).
//   These abort the program before or instead of crawling.
// - PageError: problems with a single page. These are contained inside the
//   worker that processed the page and never stop the crawl.
//
// The application layer (main.rs) wraps everything in anyhow::Result.
// =============================================================================

use crate::fetch::FetchError;

// Errors that affect the whole crawl run
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// The seed address could not be parsed or is not http(s)
    #[error("invalid seed address '{address}': {reason}")]
    InvalidSeed { address: String, reason: String },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A worker slot was requested from a closed pool. The scheduler only
    /// closes the pool after its dispatch loop has ended, so a crawl run
    /// never returns this.
    #[error("worker pool closed while the crawl was still running")]
    PoolClosed,

    /// Workers were still running when the shutdown grace period ran out.
    /// Logged, never returned: the report is printed from what accumulated.
    #[error("shutdown grace period elapsed, {abandoned} task(s) abandoned")]
    ShutdownTimeout { abandoned: usize },
}

// Errors that affect a single page
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The page could not be downloaded
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The extraction step for the page did not complete
    #[error("parse failed: {0}")]
    Parse(String),
}
