///! HTTP transport abstraction
///!
///! A query only ever needs "fetch this URI, hand back the body as text".
///! Keeping that seam behind a trait lets tests drive the client with a
///! canned transport instead of a network.

use crate::error::TransportError;
use std::future::Future;
use std::time::Duration;

const REQUEST_TIMEOUT_SECONDS: u64 = 30;
const USER_AGENT: &str = "n2yo-client/0.1";

/// Fetches a URI and returns the response body as text.
pub trait Transport: Send + Sync {
    fn fetch_text(&self, uri: &str) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Transport backed by a shared [`reqwest::Client`].
///
/// Safe for concurrent use; clones share the same connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default 30 second request timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
    }

    /// Create a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn fetch_text(&self, uri: &str) -> Result<String, TransportError> {
        let response = self.client.get(uri).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}
