//! Headless-browser extraction for script-driven chapter pages

use crate::error::ResolveError;
use crate::resolver::ImageResolver;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use std::time::Duration;
use tracing::debug;

/// Script-driven sites collect their page images under a gallery container.
const GALLERY_IMAGE_SELECTOR: &str = ".image-gallery img";

/// Extraction strategy that renders the chapter page in headless Chrome.
///
/// Each resolution owns a fresh browser session torn down when extraction
/// ends, so no browser memory is held across chapters. Gallery images are
/// read from `src`, falling back to `data-src` for lazy-loaded elements.
/// A failed session is not retried; the pipeline degrades it to an empty
/// chapter.
pub struct RenderedPageResolver {
    settle_delay: Duration,
}

impl RenderedPageResolver {
    /// Build a resolver that waits `settle_delay` after navigation for
    /// client-side script to populate the gallery.
    pub fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    fn extract_blocking(url: &str, settle_delay: Duration) -> Result<Vec<String>, ResolveError> {
        let browser_err = |reason: String| ResolveError::Browser {
            url: url.to_string(),
            reason,
        };

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| browser_err(e.to_string()))?;
        let browser = Browser::new(options).map_err(|e| browser_err(e.to_string()))?;
        let tab = browser.new_tab().map_err(|e| browser_err(e.to_string()))?;

        tab.navigate_to(url).map_err(|e| browser_err(e.to_string()))?;
        tab.wait_until_navigated()
            .map_err(|e| browser_err(e.to_string()))?;
        // Fixed settle delay: the gallery keeps filling in after the
        // navigation itself completes.
        std::thread::sleep(settle_delay);

        // find_elements reports "no matches" as an error; that is an empty
        // gallery, not a session fault.
        let elements = match tab.find_elements(GALLERY_IMAGE_SELECTOR) {
            Ok(elements) => elements,
            Err(_) => return Ok(Vec::new()),
        };

        let mut urls = Vec::new();
        for element in &elements {
            let src = element
                .get_attribute_value("src")
                .map_err(|e| browser_err(e.to_string()))?
                .filter(|v| !v.is_empty());
            let src = match src {
                Some(src) => Some(src),
                None => element
                    .get_attribute_value("data-src")
                    .map_err(|e| browser_err(e.to_string()))?
                    .filter(|v| !v.is_empty()),
            };
            if let Some(src) = src {
                urls.push(src);
            }
        }
        Ok(urls)
    }
}

#[async_trait]
impl ImageResolver for RenderedPageResolver {
    async fn image_urls(&self, chapter_url: &str) -> Result<Vec<String>, ResolveError> {
        let url = chapter_url.to_string();
        let settle_delay = self.settle_delay;
        // The chrome session is blocking; keep it off the async runtime.
        let urls = tokio::task::spawn_blocking(move || Self::extract_blocking(&url, settle_delay))
            .await
            .map_err(|e| ResolveError::Browser {
                url: chapter_url.to_string(),
                reason: format!("extraction task failed: {e}"),
            })??;
        debug!(url = chapter_url, images = urls.len(), "rendered extraction finished");
        Ok(urls)
    }
}
