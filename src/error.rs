//! Error types for capitulo
//!
//! The error taxonomy mirrors the failure isolation levels of the pipeline:
//! - [`RangeError`] — a malformed chapter boundary; recovered by producing an
//!   empty chapter list so the run ends gracefully.
//! - [`ResolveError`] — an extraction strategy fault; recovered by treating
//!   the affected chapter as zero-image.
//! - Image fetch faults are soft failures logged at the fetch site and never
//!   surface as an `Error` value.
//! - Anything else scoped to one chapter is caught at the chapter boundary
//!   and recorded as a failed chapter outcome.
//!
//! Only configuration errors are fatal to a run.

use thiserror::Error;

/// Result type alias for capitulo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for capitulo
///
/// This is the primary error type used throughout the library. Each variant
/// includes contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "url_format")
        key: Option<String>,
    },

    /// Chapter range boundary parsing error
    #[error("chapter range error: {0}")]
    Range(#[from] RangeError),

    /// Image extraction error (degraded to an empty chapter by the pipeline)
    #[error("extraction error: {0}")]
    Resolve(#[from] ResolveError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// PDF document construction error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Image decoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Chapter range boundary errors
#[derive(Debug, Error)]
pub enum RangeError {
    /// A chapter boundary string did not parse as `main` or `main-sub`
    #[error("invalid {bound} chapter {value:?}: expected a number like \"12\" or \"12-3\"")]
    InvalidBound {
        /// Which boundary was rejected ("start" or "end")
        bound: &'static str,
        /// The raw boundary string as given by the user
        value: String,
    },
}

/// Image extraction errors
///
/// These are scoped to one chapter: the pipeline logs them and continues with
/// zero images rather than aborting the run.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Failed to build the HTTP client for static extraction
    #[error("failed to build HTTP client: {reason}")]
    Client {
        /// The underlying client construction failure
        reason: String,
    },

    /// The chapter page request failed at the transport level
    #[error("request for {url} failed: {source}")]
    Request {
        /// The chapter URL that was requested
        url: String,
        /// The underlying transport error
        source: reqwest::Error,
    },

    /// The chapter page request returned a non-success status
    #[error("request for {url} returned status {status}")]
    Status {
        /// The chapter URL that was requested
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// A CSS selector used for image extraction failed to parse
    #[error("invalid image selector {selector:?}: {reason}")]
    Selector {
        /// The selector string that failed to parse
        selector: String,
        /// The parse failure reported by the selector engine
        reason: String,
    },

    /// The headless-browser session failed
    #[error("rendered-page session failed for {url}: {reason}")]
    Browser {
        /// The chapter URL that was being rendered
        url: String,
        /// The underlying browser fault
        reason: String,
    },
}
