//! Pipeline orchestration: chapter list → resolution → fetch → PDF assembly
//!
//! Chapters are processed strictly sequentially so page order inside a
//! combined document follows ascending chapter order. Failures stay scoped
//! to their level: a failed image skips one page, a failed chapter is logged
//! and the run moves on to the next one. The run never aborts because one
//! chapter failed.

use crate::chapters::{self, ChapterId};
use crate::config::{Config, OutputMode};
use crate::error::Result;
use crate::fetcher::ImageFetcher;
use crate::pdf::PdfAssembler;
use crate::resolver::ImageResolver;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Terminal state of one chapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChapterOutcome {
    /// The chapter produced pages in an output document.
    Completed {
        /// The chapter that completed
        chapter: ChapterId,
        /// Number of pages the chapter contributed
        pages: usize,
    },
    /// The chapter resolved to zero images (including extraction faults,
    /// which degrade to zero images) and contributed no pages.
    SkippedEmpty {
        /// The chapter that was skipped
        chapter: ChapterId,
    },
    /// The chapter hit an unrecoverable fault; the run continued without it.
    Failed {
        /// The chapter that failed
        chapter: ChapterId,
        /// Human-readable description of the fault
        reason: String,
    },
}

/// Aggregated result of one pipeline run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Per-chapter outcomes in processing order
    pub outcomes: Vec<ChapterOutcome>,
    /// Paths of the documents written
    pub documents: Vec<PathBuf>,
    /// Chapter-break markers emitted (combined mode only)
    pub chapter_breaks: usize,
}

impl RunSummary {
    /// Number of chapters that produced pages
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ChapterOutcome::Completed { .. }))
            .count()
    }

    /// Number of chapters skipped as empty
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ChapterOutcome::SkippedEmpty { .. }))
            .count()
    }

    /// Number of chapters that failed
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ChapterOutcome::Failed { .. }))
            .count()
    }
}

/// Composes range expansion, extraction, fetching, and PDF assembly into a
/// full download run.
pub struct Pipeline {
    config: Config,
    resolver: Box<dyn ImageResolver>,
    fetcher: ImageFetcher,
}

impl Pipeline {
    /// Build a pipeline from a validated configuration, the extraction
    /// strategy chosen for the run, and an image fetcher.
    pub fn new(config: Config, resolver: Box<dyn ImageResolver>, fetcher: ImageFetcher) -> Self {
        Self {
            config,
            resolver,
            fetcher,
        }
    }

    /// Run the pipeline over the configured chapter range.
    ///
    /// A malformed range produces zero chapters and an empty summary rather
    /// than an error. Only filesystem faults around the output directory and
    /// a failed final flush of a combined document are fatal.
    pub async fn run(&self) -> Result<RunSummary> {
        let chapters = chapters::generate_chapter_list(&self.config.start, &self.config.end);
        if chapters.is_empty() {
            info!(
                start = %self.config.start,
                end = %self.config.end,
                "no chapters to process"
            );
            return Ok(RunSummary::default());
        }

        let series_name = sanitize_filename(self.config.series.trim());
        let series_dir = self.config.output_dir.join(&series_name);
        std::fs::create_dir_all(&series_dir)?;
        info!(
            series = %self.config.series,
            count = chapters.len(),
            first = %chapters[0],
            last = %chapters[chapters.len() - 1],
            "processing chapter range"
        );

        match self.config.mode {
            OutputMode::PerChapter => {
                self.run_per_chapter(&chapters, &series_dir, &series_name).await
            }
            OutputMode::Combined => self.run_combined(&chapters, &series_dir, &series_name).await,
        }
    }

    /// One document per chapter; empty chapters produce no file.
    async fn run_per_chapter(
        &self,
        chapters: &[ChapterId],
        series_dir: &Path,
        series_name: &str,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for &chapter in chapters {
            let outcome = self
                .process_chapter(chapter, series_dir, series_name, &mut summary)
                .await;
            log_outcome(&outcome);
            summary.outcomes.push(outcome);
        }
        Ok(summary)
    }

    /// A single document spanning the whole range; every chapter ends with a
    /// break marker, empty and failed chapters included.
    async fn run_combined(
        &self,
        chapters: &[ChapterId],
        series_dir: &Path,
        series_name: &str,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let path = series_dir.join(format!(
            "{series_name}-Capitulos-{}-a-{}.pdf",
            self.config.start.trim(),
            self.config.end.trim()
        ));
        let mut doc = PdfAssembler::create(&path);

        for &chapter in chapters {
            let pages_before = doc.page_count();
            let images = self.resolve_chapter(chapter).await;
            let outcome = if images.is_empty() {
                ChapterOutcome::SkippedEmpty { chapter }
            } else {
                match self.append_pages(&mut doc, &images).await {
                    Ok(()) => ChapterOutcome::Completed {
                        chapter,
                        pages: doc.page_count() - pages_before,
                    },
                    Err(e) => ChapterOutcome::Failed {
                        chapter,
                        reason: e.to_string(),
                    },
                }
            };
            log_outcome(&outcome);
            summary.outcomes.push(outcome);
            doc.add_chapter_break();
        }

        summary.chapter_breaks = doc.chapter_breaks();
        let written = doc.finish()?;
        info!(path = %written.display(), "combined document written");
        summary.documents.push(written);
        Ok(summary)
    }

    /// Per-chapter state machine: resolve → fetch → assemble → flush.
    ///
    /// Faults inside the chapter are converted to a [`ChapterOutcome`] here;
    /// nothing unwinds past this function, so the calling loop always reaches
    /// the next chapter.
    async fn process_chapter(
        &self,
        chapter: ChapterId,
        series_dir: &Path,
        series_name: &str,
        summary: &mut RunSummary,
    ) -> ChapterOutcome {
        let images = self.resolve_chapter(chapter).await;
        if images.is_empty() {
            return ChapterOutcome::SkippedEmpty { chapter };
        }

        let path = series_dir.join(format!("{series_name}-Capitulo-{chapter}.pdf"));
        let mut doc = PdfAssembler::create(&path);
        let pages_result = self.append_pages(&mut doc, &images).await;
        let pages = doc.page_count();
        // The document is flushed even when the chapter failed mid-image.
        match (pages_result, doc.finish()) {
            (Ok(()), Ok(written)) => {
                summary.documents.push(written);
                ChapterOutcome::Completed { chapter, pages }
            }
            (Err(e), Ok(written)) => {
                summary.documents.push(written);
                ChapterOutcome::Failed {
                    chapter,
                    reason: e.to_string(),
                }
            }
            (_, Err(e)) => ChapterOutcome::Failed {
                chapter,
                reason: format!("failed to write document: {e}"),
            },
        }
    }

    /// Resolve a chapter to its image URLs, degrading extraction faults to
    /// an empty list with a logged diagnostic.
    async fn resolve_chapter(&self, chapter: ChapterId) -> Vec<String> {
        let url = chapters::chapter_url(&self.config.base_url, &chapter, self.config.url_format);
        info!(chapter = %chapter, url = %url, "downloading chapter");
        match self.resolver.image_urls(&url).await {
            Ok(urls) => urls,
            Err(e) => {
                warn!(
                    chapter = %chapter,
                    url = %url,
                    error = %e,
                    "image extraction failed, treating chapter as empty"
                );
                Vec::new()
            }
        }
    }

    /// Fetch every resolved image and append the ones that arrive as pages.
    /// A missing image skips its page; a bad payload aborts the chapter.
    async fn append_pages(&self, doc: &mut PdfAssembler, images: &[String]) -> Result<()> {
        for image_url in images {
            let Some(bytes) = self.fetcher.fetch(image_url).await else {
                continue;
            };
            doc.add_image(&bytes)?;
        }
        Ok(())
    }
}

fn log_outcome(outcome: &ChapterOutcome) {
    match outcome {
        ChapterOutcome::Completed { chapter, pages } => {
            info!(chapter = %chapter, pages, "chapter completed");
        }
        ChapterOutcome::SkippedEmpty { chapter } => {
            info!(chapter = %chapter, "no images found, skipping chapter");
        }
        ChapterOutcome::Failed { chapter, reason } => {
            warn!(chapter = %chapter, reason = %reason, "chapter failed, continuing with the next one");
        }
    }
}

/// Replace path-hostile characters so the series name is safe as a
/// directory and file-name component.
fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}
