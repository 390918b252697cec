//! Chapter identifiers, range expansion, and chapter URL derivation
//!
//! A requested range like `"1"` to `"3-2"` expands to the ordered list
//! `1, 2, 3-1, 3-2`: sub-chapters apply only to the final main number of the
//! range, never to intermediate ones. That asymmetry matches how serialized
//! sites publish fractional chapters at the end of an arc.

use crate::config::UrlFormat;
use crate::error::RangeError;
use std::fmt;
use tracing::warn;

/// Placeholder that marks the chapter insertion point in a base URL template
pub const CHAPTER_PLACEHOLDER: &str = "{chapter}";

/// Identifier for one chapter: a main number plus an optional sub-chapter
///
/// Textual form is `"{main}"` or `"{main}-{sub}"`. Ordering is by main
/// number, then sub-number, with bare chapters sorting before their
/// sub-chapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChapterId {
    main: u32,
    sub: Option<u32>,
}

impl ChapterId {
    /// Create a bare chapter identifier
    pub fn new(main: u32) -> Self {
        Self { main, sub: None }
    }

    /// Create a sub-chapter identifier (`main-sub`)
    pub fn with_sub(main: u32, sub: u32) -> Self {
        Self {
            main,
            sub: Some(sub),
        }
    }

    /// The main chapter number
    pub fn main(&self) -> u32 {
        self.main
    }

    /// The sub-chapter number, if any
    pub fn sub(&self) -> Option<u32> {
        self.sub
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub {
            Some(sub) => write!(f, "{}-{}", self.main, sub),
            None => write!(f, "{}", self.main),
        }
    }
}

/// Expand a start/end chapter pair into the ordered chapter list.
///
/// A malformed boundary is recoverable: it is logged and the function returns
/// an empty list, which the pipeline treats as "no chapters" rather than an
/// abort. `start > end` also yields an empty list without a diagnostic.
pub fn generate_chapter_list(start: &str, end: &str) -> Vec<ChapterId> {
    match expand_range(start, end) {
        Ok(chapters) => chapters,
        Err(e) => {
            warn!(error = %e, "chapter range rejected, producing no chapters");
            Vec::new()
        }
    }
}

/// Expand a start/end chapter pair, surfacing boundary parse failures.
///
/// Rules:
/// - Both bounds are split on `-`; the first segment is the main number.
/// - Every main number strictly below the end main emits a bare identifier.
/// - If `end` declares sub-chapters (`"b-k"`), the end main emits
///   `b-1` through `b-k` instead of a bare identifier.
/// - Sub-chapter notation on `start` is ignored beyond its main number.
pub fn expand_range(start: &str, end: &str) -> Result<Vec<ChapterId>, RangeError> {
    let start_main = parse_main("start", start)?;
    let end_main = parse_main("end", end)?;
    let end_subs = match end.split_once('-') {
        Some((_, subs)) => Some(parse_number("end", end, subs)?),
        None => None,
    };

    let mut chapters = Vec::new();
    for main in start_main..=end_main {
        if main == end_main {
            match end_subs {
                Some(count) => {
                    chapters.extend((1..=count).map(|sub| ChapterId::with_sub(main, sub)));
                }
                None => chapters.push(ChapterId::new(main)),
            }
        } else {
            chapters.push(ChapterId::new(main));
        }
    }
    Ok(chapters)
}

/// Derive the chapter page URL from the base URL template.
///
/// A base URL containing the `{chapter}` placeholder is taken as-is after
/// substitution; the caller already encoded the full URL shape. Without a
/// placeholder the identifier and the format suffix are appended.
pub fn chapter_url(base_url: &str, chapter: &ChapterId, format: UrlFormat) -> String {
    let id = chapter.to_string();
    if base_url.contains(CHAPTER_PLACEHOLDER) {
        base_url.replace(CHAPTER_PLACEHOLDER, &id)
    } else {
        format!("{base_url}{id}{}", format.suffix())
    }
}

fn parse_main(bound: &'static str, raw: &str) -> Result<u32, RangeError> {
    let main = raw.split('-').next().unwrap_or(raw);
    parse_number(bound, raw, main)
}

fn parse_number(bound: &'static str, raw: &str, segment: &str) -> Result<u32, RangeError> {
    segment
        .trim()
        .parse()
        .map_err(|_| RangeError::InvalidBound {
            bound,
            value: raw.to_string(),
        })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[ChapterId]) -> Vec<String> {
        list.iter().map(ChapterId::to_string).collect()
    }

    #[test]
    fn plain_range_is_consecutive_bare_identifiers() {
        let list = generate_chapter_list("3", "7");
        assert_eq!(ids(&list), ["3", "4", "5", "6", "7"]);
    }

    #[test]
    fn single_chapter_range() {
        let list = generate_chapter_list("5", "5");
        assert_eq!(ids(&list), ["5"]);
    }

    #[test]
    fn sub_chapters_expand_only_on_the_final_main() {
        let list = generate_chapter_list("1", "3-2");
        assert_eq!(ids(&list), ["1", "2", "3-1", "3-2"]);
    }

    #[test]
    fn sub_chapter_count_controls_expansion_width() {
        let list = generate_chapter_list("232", "232-5");
        assert_eq!(ids(&list), ["232-1", "232-2", "232-3", "232-4", "232-5"]);
    }

    #[test]
    fn start_sub_notation_is_ignored_beyond_its_main() {
        let list = generate_chapter_list("2-9", "4");
        assert_eq!(ids(&list), ["2", "3", "4"]);
    }

    #[test]
    fn inverted_range_yields_empty_without_error() {
        assert!(generate_chapter_list("9", "3").is_empty());
        assert!(expand_range("9", "3").unwrap().is_empty());
    }

    #[test]
    fn zero_sub_count_emits_nothing_for_the_end_main() {
        let list = generate_chapter_list("1", "2-0");
        assert_eq!(ids(&list), ["1"]);
    }

    #[test]
    fn non_numeric_bounds_yield_empty_list() {
        assert!(generate_chapter_list("abc", "3").is_empty());
        assert!(generate_chapter_list("1", "xyz").is_empty());
        assert!(generate_chapter_list("", "3").is_empty());
        assert!(generate_chapter_list("1", "3-x").is_empty());
    }

    #[test]
    fn expand_range_reports_which_bound_failed() {
        match expand_range("abc", "3").unwrap_err() {
            RangeError::InvalidBound { bound, value } => {
                assert_eq!(bound, "start");
                assert_eq!(value, "abc");
            }
        }
        match expand_range("1", "3-x").unwrap_err() {
            RangeError::InvalidBound { bound, value } => {
                assert_eq!(bound, "end");
                assert_eq!(value, "3-x");
            }
        }
    }

    #[test]
    fn generation_is_idempotent() {
        let first = generate_chapter_list("1", "4-3");
        let second = generate_chapter_list("1", "4-3");
        assert_eq!(first, second);
    }

    #[test]
    fn chapter_id_ordering_puts_bare_before_subs() {
        let mut list = vec![
            ChapterId::with_sub(3, 2),
            ChapterId::new(3),
            ChapterId::with_sub(3, 1),
            ChapterId::new(2),
        ];
        list.sort();
        assert_eq!(ids(&list), ["2", "3", "3-1", "3-2"]);
    }

    #[test]
    fn chapter_url_appends_id_and_suffix() {
        let base = "https://example.com/capitulo/one-piece-capitulo-";
        assert_eq!(
            chapter_url(base, &ChapterId::new(12), UrlFormat::Slash),
            "https://example.com/capitulo/one-piece-capitulo-12/"
        );
        assert_eq!(
            chapter_url(base, &ChapterId::with_sub(232, 5), UrlFormat::Html),
            "https://example.com/capitulo/one-piece-capitulo-232-5.html"
        );
    }

    #[test]
    fn chapter_url_substitutes_placeholder_verbatim() {
        let base = "https://example.com/ch/{chapter}/pages";
        assert_eq!(
            chapter_url(base, &ChapterId::new(7), UrlFormat::Slash),
            "https://example.com/ch/7/pages"
        );
        // The format suffix is not appended when a placeholder is present.
        assert_eq!(
            chapter_url(base, &ChapterId::new(7), UrlFormat::Html),
            "https://example.com/ch/7/pages"
        );
    }
}
