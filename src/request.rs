//! The transport boundary. The walker only needs the capability to fetch a
//! URL with headers and see the status, body, and post-redirect URL; tests
//! substitute a canned implementation.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ScraperError;

pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/81.0.4044.138 Safari/537.36";

/// Outcome of one page fetch. A non-success status is reported here, not
/// raised: deciding that it is fatal is the caller's job.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
    /// URL after redirects; differs from the requested one when a channel
    /// has no public preview page.
    pub effective_url: String,
}

pub trait Fetcher {
    /// Performs one blocking request-response round trip. `Err` means a
    /// network-level failure, distinct from a non-2xx status.
    fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchResponse, ScraperError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchResponse, ScraperError> {
        (**self).fetch(url, headers)
    }
}

/// Default transport over a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(client: reqwest::blocking::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn with_defaults() -> Result<Self, ScraperError> {
        let client = reqwest::blocking::Client::builder()
            .gzip(true)
            .build()?;
        Ok(Self::new(client, Duration::from_secs(10)))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchResponse, ScraperError> {
        let mut request = self.client.get(url).timeout(self.timeout);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let effective_url = response.url().to_string();
        let body = response.text()?;

        Ok(FetchResponse {
            status,
            body,
            effective_url,
        })
    }
}
