//! Lays a `VisualTree` out onto a fixed-width surface of absolutely positioned
//! primitives. The surface is the capture source for PDF export.
//!
//! Layout is deterministic: the same tree and page config always produce the
//! same primitives and the same height. Coordinates are CSS pixels from the
//! surface's top-left corner.
//!
//! CPU-bound; handlers run it inside `tokio::task::spawn_blocking`.

use serde::Serialize;

use crate::layout::font_metrics::{font_book, FontBook, FontError, FontFace, FontFamily};
use crate::layout::page::PageConfig;
use crate::models::TemplateVariant;
use crate::render::style::{style_for, Align, Rgb, SkillDisplay, VariantStyle};
use crate::render::template::{Block, EntryNode, SkillGroupNode, VisualTree};

/// Fraction of the font size above the baseline.
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;

// ────────────────────────────────────────────────────────────────────────────
// Surface types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    /// Baseline position.
    pub baseline: f32,
    pub size_px: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Rgb,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Text(TextRun),
    Rect(FilledRect),
}

impl Primitive {
    pub fn top(&self) -> f32 {
        match self {
            Primitive::Text(t) => t.baseline - t.size_px * ASCENT,
            Primitive::Rect(r) => r.y,
        }
    }

    pub fn bottom(&self) -> f32 {
        match self {
            Primitive::Text(t) => t.baseline + t.size_px * DESCENT,
            Primitive::Rect(r) => r.y + r.height,
        }
    }
}

/// A fully laid-out rendering of one variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub variant: TemplateVariant,
    pub font: FontFamily,
    pub width_px: f32,
    pub height_px: f32,
    pub primitives: Vec<Primitive>,
}

impl Surface {
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() || self.height_px <= 0.0
    }

    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            Primitive::Rect(_) => None,
        })
    }
}

/// Dimensions reported to clients after a render.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceSummary {
    pub width_px: f32,
    pub height_px: f32,
    pub primitive_count: usize,
}

impl From<&Surface> for SurfaceSummary {
    fn from(surface: &Surface) -> Self {
        Self {
            width_px: surface.width_px,
            height_px: surface.height_px,
            primitive_count: surface.primitives.len(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

struct Layouter<'a> {
    style: &'static VariantStyle,
    fonts: &'static FontBook,
    config: &'a PageConfig,
    y: f32,
    primitives: Vec<Primitive>,
}

pub fn layout_tree(tree: &VisualTree, config: &PageConfig) -> Result<Surface, FontError> {
    let style = style_for(tree.variant);
    let mut l = Layouter {
        style,
        fonts: font_book()?,
        config,
        y: config.padding_px,
        primitives: Vec::new(),
    };

    l.header(tree);
    for (i, section) in tree.sections.iter().enumerate() {
        if i > 0 {
            l.y += style.spacing.section_gap;
        }
        l.heading(&section.heading);
        for block in &section.blocks {
            l.block(block);
        }
    }

    Ok(Surface {
        variant: tree.variant,
        font: style.font,
        width_px: config.surface_width_px,
        height_px: (l.y + config.padding_px).ceil(),
        primitives: l.primitives,
    })
}

impl Layouter<'_> {
    fn face(&self, bold: bool, italic: bool) -> &'static FontFace {
        self.fonts.face(self.style.font, bold, italic)
    }

    fn left(&self) -> f32 {
        self.config.padding_px
    }

    fn content_width(&self) -> f32 {
        self.config.content_width_px()
    }

    fn line_height(&self, size: f32) -> f32 {
        size * self.style.scale.line_height
    }

    /// Pushes one line of text in a line box starting at the cursor.
    fn push_line(&mut self, x: f32, text: String, size: f32, bold: bool, italic: bool, color: Rgb) {
        let lh = self.line_height(size);
        let baseline = self.y + (lh - size) / 2.0 + size * ASCENT;
        self.primitives.push(Primitive::Text(TextRun {
            x,
            baseline,
            size_px: size,
            bold,
            italic,
            color,
            text,
        }));
    }

    fn push_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.primitives.push(Primitive::Rect(FilledRect {
            x,
            y,
            width,
            height,
            color,
        }));
    }

    /// Wraps and emits `text`, advancing the cursor line by line.
    #[allow(clippy::too_many_arguments)]
    fn paragraph(&mut self, text: &str, x: f32, width: f32, size: f32, bold: bool, italic: bool, color: Rgb) {
        for line in self.face(bold, italic).wrap(text, size, width) {
            self.push_line(x, line, size, bold, italic, color);
            self.y += self.line_height(size);
        }
    }

    fn aligned_paragraph(&mut self, text: &str, align: Align, size: f32, bold: bool, color: Rgb) {
        let width = self.content_width();
        let face = self.face(bold, false);
        for line in face.wrap(text, size, width) {
            let x = match align {
                Align::Left => self.left(),
                Align::Center => {
                    let w = face.width_px(&line, size);
                    self.left() + ((width - w) / 2.0).max(0.0)
                }
            };
            self.push_line(x, line, size, bold, false, color);
            self.y += self.line_height(size);
        }
    }

    fn header(&mut self, tree: &VisualTree) {
        let style = self.style;
        let align = tree.header.align;
        self.aligned_paragraph(&tree.header.name, align, style.scale.name, true, style.text_color);
        self.y += style.spacing.name_gap;
        self.aligned_paragraph(
            &tree.header.contact,
            align,
            style.scale.contact,
            false,
            style.muted_color,
        );
        if let Some(rule) = style.header_rule {
            self.y += 16.0;
            self.push_rect(self.left(), self.y, self.content_width(), 2.0, rule);
            self.y += 2.0;
        }
        self.y += style.spacing.header_gap;
    }

    fn heading(&mut self, heading: &str) {
        let style = self.style;
        self.paragraph(
            heading,
            self.left(),
            self.content_width(),
            style.scale.heading,
            true,
            false,
            style.accent_color,
        );
        if let Some(rule) = style.heading_rule {
            self.y += 4.0;
            self.push_rect(self.left(), self.y, self.content_width(), 1.0, rule);
            self.y += 1.0;
        }
        self.y += style.spacing.heading_gap;
    }

    fn block(&mut self, block: &Block) {
        let style = self.style;
        match block {
            Block::Paragraph { text } => self.paragraph(
                text,
                self.left(),
                self.content_width(),
                style.scale.body,
                false,
                false,
                style.text_color,
            ),
            Block::Entry(entry) => self.entry(entry),
            Block::SkillGroup(group) => match group.display {
                SkillDisplay::Chips => self.chips(group),
                SkillDisplay::Inline => self.inline_skills(group),
            },
            Block::Bullets { items } => self.bullets(items),
        }
    }

    fn entry(&mut self, entry: &EntryNode) {
        let style = self.style;
        let body = style.scale.body;
        let detail = style.scale.detail;

        // meta sits right-aligned on the title row
        let meta_width = entry
            .meta
            .as_deref()
            .map(|m| self.face(false, false).width_px(m, detail))
            .unwrap_or(0.0);
        if let Some(meta) = entry.meta.as_deref() {
            let x = self.left() + self.content_width() - meta_width;
            let size_offset = (self.line_height(body) - self.line_height(detail)) / 2.0;
            self.y += size_offset;
            self.push_line(x.max(self.left()), meta.to_string(), detail, false, false, style.muted_color);
            self.y -= size_offset;
        }

        let title_width = (self.content_width() - meta_width - 16.0).max(self.content_width() / 2.0);
        self.paragraph(&entry.title, self.left(), title_width, body, true, false, style.text_color);
        self.paragraph(
            &entry.subtitle,
            self.left(),
            title_width,
            body,
            false,
            style.position_italic,
            style.muted_color,
        );
        if !entry.bullets.is_empty() {
            self.y += 8.0;
            self.bullets(&entry.bullets);
        }
        self.y += style.spacing.entry_gap;
    }

    fn bullets(&mut self, items: &[String]) {
        let style = self.style;
        let size = style.scale.bullet;
        let mark = (size * 0.25).round().max(2.0);
        let x_mark = self.left() + style.spacing.bullet_indent;
        let x_text = x_mark + size * 0.75;
        let width = self.left() + self.content_width() - x_text;

        for item in items {
            let lh = self.line_height(size);
            self.push_rect(x_mark, self.y + (lh - mark) / 2.0, mark, mark, style.text_color);
            self.paragraph(item, x_text, width, size, false, false, style.text_color);
            self.y += 4.0;
        }
    }

    fn inline_skills(&mut self, group: &SkillGroupNode) {
        let style = self.style;
        let size = style.scale.body;
        let label = format!("{}:", group.label);
        let label_width =
            self.face(true, false).width_px(&label, size) + self.face(false, false).width_px(" ", size);

        let start_y = self.y;
        self.push_line(self.left(), label, size, true, false, style.text_color);
        let x = self.left() + label_width;
        self.paragraph(
            &group.joined(),
            x,
            self.content_width() - label_width,
            size,
            false,
            false,
            style.text_color,
        );
        // an empty list still occupies the label's line
        if self.y == start_y {
            self.y += self.line_height(size);
        }
        self.y += 4.0;
    }

    fn chips(&mut self, group: &SkillGroupNode) {
        let style = self.style;
        let chip = style.chip;
        let size = style.scale.detail;

        self.paragraph(
            &format!("{}:", group.label),
            self.left(),
            self.content_width(),
            style.scale.body,
            true,
            false,
            style.text_color,
        );

        let chip_height = self.line_height(size) + 2.0 * chip.pad_y;
        let right = self.left() + self.content_width();
        let mut x = self.left();
        let mut placed_any = false;

        for item in &group.items {
            let text_width = self.face(false, false).width_px(item, size);
            let chip_width = text_width + 2.0 * chip.pad_x;
            if placed_any && x + chip_width > right {
                x = self.left();
                self.y += chip_height + chip.gap;
            }
            self.push_rect(x, self.y, chip_width, chip_height, chip.background);
            let saved = self.y;
            self.y += chip.pad_y;
            self.push_line(x + chip.pad_x, item.clone(), size, false, false, chip.text);
            self.y = saved;
            x += chip_width + chip.gap;
            placed_any = true;
        }
        if placed_any {
            self.y += chip_height;
        }
        self.y += 12.0;
    }
}
