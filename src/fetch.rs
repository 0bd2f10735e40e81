//! Article content fetching.
//!
//! A single trait seam, [`FetchPage`], separates the pipeline from the
//! transport so that orchestration can be tested against canned pages.
//! The one production implementation, [`HttpFetcher`], issues a single
//! GET per URL with no retries; every transport-level problem (connection
//! failure, timeout, non-success status) surfaces as an error that the
//! pipeline downgrades to a warning plus an empty document.

use std::error::Error;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::utils::truncate_for_log;

/// Retrieve the body of a web page.
pub trait FetchPage {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Any transport failure or non-success status code. Callers are
    /// expected to treat errors as non-fatal.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// HTTP fetcher backed by a shared [`reqwest::Client`].
///
/// The client carries a per-request timeout so a single unresponsive host
/// cannot stall the whole run.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            preview = %truncate_for_log(&body, 120),
            "Fetched page"
        );
        Ok(body)
    }
}
