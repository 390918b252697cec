//! Run configuration for capitulo

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// How chapter URLs on the target site are terminated
///
/// The format determines both the suffix appended when deriving chapter URLs
/// and which extraction strategy the run uses: `.html` sites populate their
/// galleries from client-side script and need rendered extraction, everything
/// else is parsed as static HTML.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlFormat {
    /// Chapter URLs end with a trailing slash (static extraction)
    #[default]
    Slash,
    /// Chapter URLs end with `.html` (rendered extraction)
    Html,
}

impl UrlFormat {
    /// Suffix appended after the chapter identifier when deriving chapter URLs
    pub fn suffix(&self) -> &'static str {
        match self {
            UrlFormat::Slash => "/",
            UrlFormat::Html => ".html",
        }
    }

    /// Whether this format requires the headless-browser extraction strategy
    pub fn uses_rendered_extraction(&self) -> bool {
        matches!(self, UrlFormat::Html)
    }
}

impl FromStr for UrlFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "/" | "slash" => Ok(UrlFormat::Slash),
            "html" | ".html" => Ok(UrlFormat::Html),
            other => Err(Error::Config {
                message: format!("invalid URL format {other:?}: expected \"/\" or \"html\""),
                key: Some("url_format".to_string()),
            }),
        }
    }
}

impl std::fmt::Display for UrlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlFormat::Slash => write!(f, "/"),
            UrlFormat::Html => write!(f, "html"),
        }
    }
}

/// Document lifetime policy for the run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One PDF per chapter
    #[default]
    PerChapter,
    /// A single PDF spanning the whole requested range
    Combined,
}

/// Main configuration for a download run
///
/// All fields have serde defaults so partial configurations deserialize
/// cleanly; [`Config::validate`] checks the fields that have no sensible
/// default (series name, base URL, chapter bounds).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Series name, used verbatim (after path sanitizing) in output
    /// folder and file names
    #[serde(default)]
    pub series: String,

    /// Base chapter URL; either the prefix the chapter identifier is
    /// appended to, or a template containing a `{chapter}` placeholder
    #[serde(default)]
    pub base_url: String,

    /// How chapter URLs are terminated (also selects the extraction strategy)
    #[serde(default)]
    pub url_format: UrlFormat,

    /// First chapter of the range, e.g. `"1"`
    #[serde(default)]
    pub start: String,

    /// Last chapter of the range, e.g. `"10"` or `"232-5"` for sub-chapters
    #[serde(default)]
    pub end: String,

    /// Document lifetime policy (default: one PDF per chapter)
    #[serde(default)]
    pub mode: OutputMode,

    /// Directory the `<series>` output folder is created in (default: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Settle delay for rendered-page extraction in milliseconds
    /// (default: 3000) — how long the browser waits for client-side
    /// script to populate the gallery
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// User-agent header sent with page and image requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            series: String::new(),
            base_url: String::new(),
            url_format: UrlFormat::default(),
            start: String::new(),
            end: String::new(),
            mode: OutputMode::default(),
            output_dir: default_output_dir(),
            settle_delay_ms: default_settle_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Validate the fields that have no sensible default.
    ///
    /// Checks that the series name, base URL, and both chapter bounds are
    /// present, and that the base URL parses as an absolute URL once the
    /// `{chapter}` placeholder (if any) is substituted.
    pub fn validate(&self) -> Result<()> {
        if self.series.trim().is_empty() {
            return Err(config_error("series name must not be empty", "series"));
        }
        if self.base_url.trim().is_empty() {
            return Err(config_error("base URL must not be empty", "base_url"));
        }
        let probe = crate::chapters::chapter_url(
            &self.base_url,
            &crate::chapters::ChapterId::new(1),
            self.url_format,
        );
        if let Err(e) = Url::parse(&probe) {
            return Err(Error::Config {
                message: format!("base URL {:?} is not a valid URL: {e}", self.base_url),
                key: Some("base_url".to_string()),
            });
        }
        if self.start.trim().is_empty() {
            return Err(config_error("start chapter must not be empty", "start"));
        }
        if self.end.trim().is_empty() {
            return Err(config_error("end chapter must not be empty", "end"));
        }
        Ok(())
    }
}

fn config_error(message: &str, key: &str) -> Error {
    Error::Config {
        message: message.to_string(),
        key: Some(key.to_string()),
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_settle_delay_ms() -> u64 {
    3000
}

fn default_user_agent() -> String {
    format!(
        "capitulo/{} ({}; +https://github.com/capitulo-dl/capitulo)",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}
