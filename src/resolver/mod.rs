//! Image-URL extraction strategies
//!
//! Two interchangeable strategies turn one chapter page into an ordered list
//! of image URLs: [`StaticHtmlResolver`] parses server-rendered HTML, and
//! [`RenderedPageResolver`] drives a headless browser for sites that populate
//! their galleries from client-side script. The strategy is chosen once per
//! run from the configured URL format and injected into the pipeline.

mod rendered;
mod static_html;


pub use rendered::RenderedPageResolver;
pub use static_html::StaticHtmlResolver;

use crate::config::{Config, UrlFormat};
use crate::error::ResolveError;
use async_trait::async_trait;
use std::time::Duration;

/// Strategy seam for turning a chapter page into an ordered image-URL list.
///
/// Implementations report faults as [`ResolveError`]; the pipeline degrades
/// any error to an empty chapter rather than aborting the run.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    /// Resolve the chapter page at `chapter_url` to image URLs in document order.
    async fn image_urls(&self, chapter_url: &str) -> Result<Vec<String>, ResolveError>;
}

/// Build the extraction strategy implied by the configured URL format.
///
/// `.html` sites get rendered extraction, everything else static extraction.
pub fn resolver_for(config: &Config) -> Result<Box<dyn ImageResolver>, ResolveError> {
    Ok(match config.url_format {
        UrlFormat::Html => Box::new(RenderedPageResolver::new(Duration::from_millis(
            config.settle_delay_ms,
        ))),
        UrlFormat::Slash => Box::new(StaticHtmlResolver::new(&config.user_agent)?),
    })
}
