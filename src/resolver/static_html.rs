//! Static HTML extraction for server-rendered chapter pages

use crate::error::ResolveError;
use crate::resolver::ImageResolver;
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

/// Page images on server-rendered sites sit directly inside paragraph tags;
/// decoration and navigation images do not.
const PAGE_IMAGE_SELECTOR: &str = "p > img";

/// Extraction strategy that fetches the chapter page and parses it as HTML.
pub struct StaticHtmlResolver {
    client: reqwest::Client,
    selector: Selector,
}

impl StaticHtmlResolver {
    /// Build a resolver with its own HTTP client using the given user agent.
    pub fn new(user_agent: &str) -> Result<Self, ResolveError> {
        let selector =
            Selector::parse(PAGE_IMAGE_SELECTOR).map_err(|e| ResolveError::Selector {
                selector: PAGE_IMAGE_SELECTOR.to_string(),
                reason: e.to_string(),
            })?;
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ResolveError::Client {
                reason: e.to_string(),
            })?;
        Ok(Self { client, selector })
    }

    /// Extract the `src` of every `<img>` that is a direct child of a `<p>`,
    /// in document order. Elements with a missing or empty `src` are dropped.
    pub(crate) fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .filter_map(|img| img.value().attr("src"))
            .filter(|src| !src.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[async_trait]
impl ImageResolver for StaticHtmlResolver {
    async fn image_urls(&self, chapter_url: &str) -> Result<Vec<String>, ResolveError> {
        let response =
            self.client
                .get(chapter_url)
                .send()
                .await
                .map_err(|source| ResolveError::Request {
                    url: chapter_url.to_string(),
                    source,
                })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: chapter_url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(|source| ResolveError::Request {
            url: chapter_url.to_string(),
            source,
        })?;
        let urls = self.extract(&body);
        debug!(url = chapter_url, images = urls.len(), "static extraction finished");
        Ok(urls)
    }
}
