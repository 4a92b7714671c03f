// src/fetch/http.rs
// =============================================================================
// The real page fetcher.
//
// How it works:
// 1. Build one reqwest Client up front (connection pooling across workers)
// 2. GET the page
// 3. Treat any non-2xx status as a failure
// 4. Hand back the raw body bytes; decoding happens in the page pipeline
//
// There is no retry: a failed page is dropped by the caller.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{FetchError, Fetcher};

// Fetches pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher whose requests give up after `timeout`
    //
    // Redirects are followed (up to 10, reqwest's default policy).
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(address.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<p>hello</p>")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/", server.url())).unwrap();
        let body = fetcher().fetch(&url).await.unwrap();

        assert_eq!(body, b"<p>hello</p>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_request_error() {
        // Port 9 (discard) is essentially never listening on a test machine
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Request(_)));
    }
}
