//! PDF export: capture a laid-out surface at a fixed upscale factor, fit the
//! capture width to an A4 page, and slice the capture height into pages.
//!
//! Each page draws the part of the capture falling into its slice, shifted up
//! by the slice offset, so consecutive pages read as one continuous tall image.
//! Anything outside the page box is clipped by the viewer.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use printpdf::path::PaintMode;
use printpdf::{
    Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Rect,
    Rgb as PdfRgb,
};
use tracing::{debug, warn};

use crate::export::ExportError;
use crate::layout::font_metrics::FontBook;
use crate::layout::surface::{FilledRect, Primitive, TextRun};
use crate::layout::{font_book, FontFamily, PageConfig, Surface};
use crate::render::style::Rgb;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// A surface scaled by the capture factor, in capture pixels.
#[derive(Debug, Clone)]
pub struct Capture {
    pub width_px: f32,
    pub height_px: f32,
    pub scale: f32,
    pub font: FontFamily,
    pub primitives: Vec<Primitive>,
}

impl Capture {
    fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            Primitive::Rect(_) => None,
        })
    }
}

/// Scales every primitive of `surface` by `config.capture_scale`.
pub fn capture(surface: &Surface, config: &PageConfig) -> Result<Capture, ExportError> {
    if surface.is_empty() {
        return Err(ExportError::EmptySurface);
    }
    let s = config.capture_scale;
    let primitives = surface
        .primitives
        .iter()
        .map(|p| match p {
            Primitive::Text(t) => Primitive::Text(TextRun {
                x: t.x * s,
                baseline: t.baseline * s,
                size_px: t.size_px * s,
                ..t.clone()
            }),
            Primitive::Rect(r) => Primitive::Rect(FilledRect {
                x: r.x * s,
                y: r.y * s,
                width: r.width * s,
                height: r.height * s,
                color: r.color,
            }),
        })
        .collect();

    Ok(Capture {
        width_px: surface.width_px * s,
        height_px: surface.height_px * s,
        scale: s,
        font: surface.font,
        primitives,
    })
}

/// Vertical offsets (mm) of each page's slice of an image `image_height_mm` tall.
///
/// The first page always exists; another is added while image height extends
/// past the pages so far.
pub fn paginate(image_height_mm: f32, page_height_mm: f32) -> Vec<f32> {
    let mut offsets = vec![0.0];
    let mut height_left = image_height_mm - page_height_mm;
    while height_left > 0.0 {
        offsets.push(offsets.len() as f32 * page_height_mm);
        height_left = image_height_mm - offsets.len() as f32 * page_height_mm;
    }
    offsets
}

/// A composed PDF.
#[derive(Debug)]
pub struct PdfArtifact {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// The embedded faces, one per (bold, italic) combination the capture draws.
struct FontSet {
    faces: HashMap<(bool, bool), IndirectFontRef>,
}

impl FontSet {
    fn load(doc: &PdfDocumentReference, book: &FontBook, capture: &Capture) -> Result<Self, ExportError> {
        let mut faces = HashMap::new();
        for run in capture.text_runs() {
            if let Entry::Vacant(slot) = faces.entry((run.bold, run.italic)) {
                let face = book.face(capture.font, run.bold, run.italic);
                slot.insert(doc.add_external_font(face.bytes()).map_err(pdf_err)?);
            }
        }
        Ok(Self { faces })
    }

    fn face(&self, bold: bool, italic: bool) -> Result<&IndirectFontRef, ExportError> {
        self.faces
            .get(&(bold, italic))
            .ok_or_else(|| ExportError::Pdf(format!("no face loaded for bold={bold} italic={italic}")))
    }
}

fn pdf_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

fn fill(color: Rgb) -> Color {
    let (r, g, b) = color.unit();
    Color::Rgb(PdfRgb::new(r, g, b, None))
}

/// Page geometry for drawing one slice.
struct Slice {
    offset_mm: f32,
    page_height_mm: f32,
    mm_per_px: f32,
}

impl Slice {
    fn contains(&self, p: &Primitive) -> bool {
        let top = p.top() * self.mm_per_px;
        let bottom = p.bottom() * self.mm_per_px;
        bottom > self.offset_mm && top < self.offset_mm + self.page_height_mm
    }

    /// Converts a capture y (px, from the top) to PDF user space (mm, from the bottom).
    fn y(&self, y_px: f32) -> Mm {
        Mm(self.page_height_mm - (y_px * self.mm_per_px - self.offset_mm))
    }

    fn x(&self, x_px: f32) -> Mm {
        Mm(x_px * self.mm_per_px)
    }
}

fn draw_slice(
    layer: &PdfLayerReference,
    capture: &Capture,
    fonts: &FontSet,
    slice: &Slice,
) -> Result<(), ExportError> {
    for primitive in capture.primitives.iter().filter(|p| slice.contains(p)) {
        match primitive {
            Primitive::Rect(r) => {
                layer.set_fill_color(fill(r.color));
                let rect = Rect::new(
                    slice.x(r.x),
                    slice.y(r.y + r.height),
                    slice.x(r.x + r.width),
                    slice.y(r.y),
                )
                .with_mode(PaintMode::Fill);
                layer.add_rect(rect);
            }
            Primitive::Text(t) => {
                layer.set_fill_color(fill(t.color));
                let size_pt = t.size_px * slice.mm_per_px / MM_PER_PT;
                layer.use_text(
                    t.text.as_str(),
                    size_pt,
                    slice.x(t.x),
                    slice.y(t.baseline),
                    fonts.face(t.bold, t.italic)?,
                );
            }
        }
    }
    Ok(())
}

/// Composes every page, then serializes the document. Nothing is returned
/// unless all pages were written.
pub fn export_pdf(surface: &Surface, config: &PageConfig, title: &str) -> Result<PdfArtifact, ExportError> {
    let capture = capture(surface, config)?;
    let book = font_book().map_err(pdf_err)?;
    let mm_per_px = config.page_width_mm / capture.width_px;
    let image_height_mm = capture.height_px * mm_per_px;
    let offsets = paginate(image_height_mm, config.page_height_mm);

    // TODO: embed a CJK fallback face (Noto Sans CJK) so ideographs are drawn instead of skipped
    let missing: usize = capture
        .text_runs()
        .map(|t| book.face(capture.font, t.bold, t.italic).missing_chars(&t.text))
        .sum();
    if missing > 0 {
        warn!(missing, font = ?capture.font, "Characters without a glyph are skipped");
    }

    let page_w = Mm(config.page_width_mm);
    let page_h = Mm(config.page_height_mm);
    let (doc, first_page, first_layer) = PdfDocument::new(title, page_w, page_h, "Page 1");
    let fonts = FontSet::load(&doc, book, &capture)?;

    for (index, offset_mm) in offsets.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(page_w, page_h, format!("Page {}", index + 1))
        };
        let layer = doc.get_page(page).get_layer(layer);
        let slice = Slice {
            offset_mm: *offset_mm,
            page_height_mm: config.page_height_mm,
            mm_per_px,
        };
        draw_slice(&layer, &capture, &fonts, &slice)?;
    }

    let bytes = doc.save_to_bytes().map_err(pdf_err)?;
    debug!(
        pages = offsets.len(),
        image_height_mm,
        bytes = bytes.len(),
        "PDF composed"
    );
    Ok(PdfArtifact {
        bytes,
        page_count: offsets.len(),
    })
}
