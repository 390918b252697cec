//! # capitulo
//!
//! Downloads the page images of a serialized webcomic across a chapter range
//! and assembles them into PDF documents, either one PDF per chapter or a
//! single combined PDF spanning the range.
//!
//! ## Design Philosophy
//!
//! - **Two extraction strategies** - static HTML parsing for server-rendered
//!   sites, a headless-browser pass for script-driven ones, selected once per
//!   run from the URL format
//! - **Failure isolation** - a failed image skips one page, a failed chapter
//!   is logged and the run continues; only malformed configuration aborts
//! - **Library-first** - the CLI binary is a thin wrapper over the pipeline
//!
//! ## Quick Start
//!
//! ```no_run
//! use capitulo::{Config, ImageFetcher, OutputMode, Pipeline, resolver_for};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         series: "One Piece".to_string(),
//!         base_url: "https://mangaonline.biz/capitulo/one-piece-capitulo-".to_string(),
//!         start: "1".to_string(),
//!         end: "10".to_string(),
//!         mode: OutputMode::Combined,
//!         ..Config::default()
//!     };
//!     config.validate()?;
//!
//!     let resolver = resolver_for(&config)?;
//!     let fetcher = ImageFetcher::new(&config.user_agent)?;
//!     let summary = Pipeline::new(config, resolver, fetcher).run().await?;
//!
//!     println!(
//!         "{} completed, {} skipped, {} failed",
//!         summary.completed(),
//!         summary.skipped(),
//!         summary.failed()
//!     );
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Chapter identifiers, range expansion, and URL derivation
pub mod chapters;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Per-image byte retrieval
pub mod fetcher;
/// PDF document sink
pub mod pdf;
/// Pipeline orchestration
pub mod pipeline;
/// Image-URL extraction strategies
pub mod resolver;

// Re-export commonly used types
pub use chapters::{CHAPTER_PLACEHOLDER, ChapterId, chapter_url, generate_chapter_list};
pub use config::{Config, OutputMode, UrlFormat};
pub use error::{Error, RangeError, ResolveError, Result};
pub use fetcher::ImageFetcher;
pub use pdf::PdfAssembler;
pub use pipeline::{ChapterOutcome, Pipeline, RunSummary};
pub use resolver::{ImageResolver, RenderedPageResolver, StaticHtmlResolver, resolver_for};
