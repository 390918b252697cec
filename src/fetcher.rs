//! Per-image byte retrieval with soft failure semantics
//!
//! A failed image download is never fatal: the fetcher logs the fault and
//! reports the image as absent, so the chapter continues with the pages that
//! did arrive.

use crate::error::Result;
use tracing::warn;

/// Retrieves raw bytes for single image URLs over a shared HTTP client.
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    /// Build a fetcher with its own HTTP client using the given user agent.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Fetch the image at `url`.
    ///
    /// Any transport or status fault is logged and yields `None`; the caller
    /// skips that single page and continues the chapter.
    pub async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        match self.try_fetch(url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(url, error = %e, "image fetch failed, page skipped");
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
