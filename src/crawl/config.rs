// src/crawl/config.rs
// =============================================================================
// Validated crawl settings.
//
// The CLI hands us raw strings and numbers; CrawlConfig is the typed form the
// scheduler runs on. The seed address is normalized here:
// - a trailing '/' is appended if missing ("https://a.com/docs" becomes
//   "https://a.com/docs/"), so directory-style roots resolve relative links
//   the way a browser would
// - it must parse as an absolute http(s) URL
// =============================================================================

use std::time::Duration;
use url::Url;

use crate::error::CrawlError;

pub const DEFAULT_MAX_DEPTH: usize = 2;
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(60);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Normalized seed address, crawled at depth 0
    pub seed: Url,
    /// Deepest link hop that is still fetched (seed = 0)
    pub max_depth: usize,
    /// Size of the worker pool
    pub workers: usize,
    /// How long to wait for running workers once the crawl is done
    pub grace_period: Duration,
    /// Per-request timeout used by the HTTP fetcher
    pub fetch_timeout: Duration,
}

impl CrawlConfig {
    // Builds a config with default pool size, grace period and timeout
    //
    // Fails with InvalidSeed if `seed` isn't an absolute http(s) address.
    pub fn new(seed: &str, max_depth: usize) -> Result<Self, CrawlError> {
        Ok(Self {
            seed: parse_seed(seed)?,
            max_depth,
            workers: num_cpus::get().max(1),
            grace_period: DEFAULT_GRACE_PERIOD,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    // Checks the values the setters can't reject on their own
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.workers == 0 {
            return Err(CrawlError::InvalidConfig(
                "worker pool size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// Normalizes and parses the seed address
//
// Examples:
//   "https://example.com"      -> https://example.com/
//   "https://example.com/docs" -> https://example.com/docs/
//   "example.com"              -> InvalidSeed (no scheme)
//   "ftp://example.com"        -> InvalidSeed (not http/https)
pub fn parse_seed(raw: &str) -> Result<Url, CrawlError> {
    let raw = raw.trim();
    let mut normalized = raw.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }

    let invalid = |reason: String| CrawlError::InvalidSeed {
        address: raw.to_string(),
        reason,
    };

    let url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.has_host() {
        return Err(invalid("address has no host".to_string()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_appended() {
        let url = parse_seed("https://example.com/docs").unwrap();
        assert_eq!(url.as_str(), "https://example.com/docs/");
    }

    #[test]
    fn test_existing_trailing_slash_is_kept() {
        let url = parse_seed("https://example.com/docs/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/docs/");
    }

    #[test]
    fn test_bare_host() {
        let url = parse_seed("http://example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com/");
    }

    #[test]
    fn test_missing_scheme_is_rejected() {
        let err = parse_seed("example.com").unwrap_err();
        assert!(matches!(err, CrawlError::InvalidSeed { .. }));
    }

    #[test]
    fn test_unsupported_scheme_is_rejected() {
        let err = parse_seed("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::new("https://example.com", DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(config.max_depth, 2);
        assert!(config.workers >= 1);
        assert_eq!(config.grace_period, DEFAULT_GRACE_PERIOD);
        assert_eq!(config.fetch_timeout, DEFAULT_FETCH_TIMEOUT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_is_invalid() {
        let config = CrawlConfig::new("https://example.com", 1)
            .unwrap()
            .with_workers(0);
        assert!(matches!(config.validate(), Err(CrawlError::InvalidConfig(_))));
    }
}
