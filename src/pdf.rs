//! PDF document sink
//!
//! Assembles downloaded page images into a PDF document: each image becomes
//! one full page, scaled to fit the page box and horizontally centered.
//! Chapter breaks mark where one chapter ends and the next starts on a fresh
//! page; with one image per page they add no geometry of their own but are
//! tracked so callers can report them.
//!
//! JPEG payloads are embedded as-is under `DCTDecode`; every other format is
//! decoded and re-embedded as raw RGB samples (compressed with the rest of
//! the document streams at save time).

use crate::error::Result;
use image::GenericImageView;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A4 page box in PDF points.
const PAGE_WIDTH: f32 = 595.0;
/// A4 page box in PDF points.
const PAGE_HEIGHT: f32 = 842.0;

/// Writes an ordered stream of images as full PDF pages to one output file.
///
/// The document accumulates in memory and is written out by [`finish`],
/// which the pipeline calls on every exit path — including after a
/// mid-chapter failure, so partial documents are still flushed.
///
/// [`finish`]: PdfAssembler::finish
pub struct PdfAssembler {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    chapter_breaks: usize,
    path: PathBuf,
}

impl PdfAssembler {
    /// Open a new empty document that [`finish`](Self::finish) will write to `path`.
    pub fn create(path: impl Into<PathBuf>) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            chapter_breaks: 0,
            path: path.into(),
        }
    }

    /// The path the finished document will be written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Number of chapter-break markers recorded so far.
    pub fn chapter_breaks(&self) -> usize {
        self.chapter_breaks
    }

    /// Append one page holding `bytes`, scaled to fit the page and
    /// horizontally centered, anchored to the top edge.
    pub fn add_image(&mut self, bytes: &[u8]) -> Result<()> {
        let (xobject, width, height) = image_xobject(bytes)?;
        let image_id = self.doc.add_object(xobject);

        let scale = (PAGE_WIDTH / width).min(PAGE_HEIGHT / height);
        let draw_width = width * scale;
        let draw_height = height * scale;
        let x = (PAGE_WIDTH - draw_width) / 2.0;
        let y = PAGE_HEIGHT - draw_height;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        draw_width.into(),
                        0.into(),
                        0.into(),
                        draw_height.into(),
                        x.into(),
                        y.into(),
                    ],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => Object::Reference(image_id) },
            },
            "Contents" => Object::Reference(content_id),
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Record that the current chapter ended; the next image starts a fresh
    /// page. Emitted after every chapter in combined mode, empty chapters
    /// included.
    pub fn add_chapter_break(&mut self) {
        self.chapter_breaks += 1;
    }

    /// Finalize the page tree and write the document to its path.
    pub fn finish(mut self) -> Result<PathBuf> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let page_count = self.page_ids.len();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(self.pages_id),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();
        self.doc.save(&self.path)?;
        debug!(path = %self.path.display(), pages = page_count, "document written");
        Ok(self.path)
    }
}

/// Build an image XObject stream plus its pixel dimensions.
fn image_xobject(bytes: &[u8]) -> Result<(Stream, f32, f32)> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = decoded.dimensions();

    let stream = match format {
        image::ImageFormat::Jpeg => Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => jpeg_color_space(&decoded),
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            bytes.to_vec(),
        ),
        _ => Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            decoded.to_rgb8().into_raw(),
        ),
    };
    Ok((stream, width as f32, height as f32))
}

fn jpeg_color_space(decoded: &image::DynamicImage) -> &'static str {
    match decoded.color() {
        image::ColorType::L8 | image::ColorType::L16 => "DeviceGray",
        _ => "DeviceRGB",
    }
}
