//! Rich-text document export. The record is first mapped to a `RichDocument`
//! (plain data, easy to assert on) and then packed to `.docx` with docx-rs.
//!
//! Sizes are in half-points and spacing in twentieths of a point, as in the
//! underlying format.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BorderType, Docx, LineSpacing, Paragraph, ParagraphBorder,
    ParagraphBorderPosition, ParagraphBorders, Run, RunFonts,
};

use crate::export::ExportError;
use crate::models::{ResumeRecord, TemplateVariant};
use crate::render::style::{style_for, Align};
use crate::render::template::{SectionKind, SKILL_LABELS};

const NAME_SIZE: usize = 32;
const CONTACT_SIZE: usize = 20;
const HEADING_SIZE: usize = 24;
const BODY_SIZE: usize = 22;
const BULLET: &str = "• ";
const RULE_COLOR: &str = "000000";

#[derive(Debug, Clone, PartialEq)]
pub struct RichRun {
    pub text: String,
    pub size: usize,
    pub bold: bool,
    /// `RRGGBB`; `None` leaves the document default.
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RichParagraph {
    pub runs: Vec<RichRun>,
    pub align: Align,
    pub before: u32,
    pub after: u32,
    pub bottom_border: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RichDocument {
    pub variant: TemplateVariant,
    pub font: &'static str,
    pub paragraphs: Vec<RichParagraph>,
}

impl RichParagraph {
    fn body(text: impl Into<String>, after: u32) -> Self {
        Self::single(RichRun {
            text: text.into(),
            size: BODY_SIZE,
            bold: false,
            color: None,
        })
        .after(after)
    }

    fn single(run: RichRun) -> Self {
        Self {
            runs: vec![run],
            align: Align::Left,
            before: 0,
            after: 0,
            bottom_border: false,
        }
    }

    fn after(mut self, after: u32) -> Self {
        self.after = after;
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document tree
// ────────────────────────────────────────────────────────────────────────────

pub fn build_document(record: &ResumeRecord, variant: TemplateVariant) -> RichDocument {
    let style = style_for(variant);
    let accent = style.accent_color.hex();
    let ruled = style.heading_rule.is_some();
    let mut paragraphs = Vec::new();

    paragraphs.push(RichParagraph {
        align: Align::Center,
        ..RichParagraph::single(RichRun {
            text: record.contact.name.clone(),
            size: NAME_SIZE,
            bold: true,
            color: None,
        })
        .after(200)
    });
    paragraphs.push(RichParagraph {
        align: Align::Center,
        ..RichParagraph::single(RichRun {
            text: record.contact_line(),
            size: CONTACT_SIZE,
            bold: false,
            color: None,
        })
        .after(400)
    });

    let heading = |kind: SectionKind| RichParagraph {
        runs: vec![RichRun {
            text: kind.title().to_uppercase(),
            size: HEADING_SIZE,
            bold: true,
            color: Some(accent.clone()),
        }],
        align: Align::Left,
        before: if kind == SectionKind::Skills { 400 } else { 200 },
        after: 200,
        bottom_border: ruled,
    };

    for kind in SectionKind::ORDER {
        match kind {
            SectionKind::Profile => {
                paragraphs.push(heading(kind));
                paragraphs.push(RichParagraph::body(record.profile.clone(), 400));
            }
            SectionKind::Education => {
                paragraphs.push(heading(kind));
                paragraphs.extend(
                    record
                        .education
                        .iter()
                        .map(|edu| RichParagraph::body(edu.summary_line(), 100)),
                );
            }
            SectionKind::Skills => {
                paragraphs.push(heading(kind));
                let groups = [
                    &record.skills.technical,
                    &record.skills.analytical,
                    &record.skills.soft,
                ];
                for (i, (label, items)) in SKILL_LABELS.iter().zip(groups).enumerate() {
                    let after = if i + 1 == SKILL_LABELS.len() { 400 } else { 100 };
                    paragraphs.push(RichParagraph::body(
                        format!("{label}: {}", items.join(", ")),
                        after,
                    ));
                }
            }
            SectionKind::Experience => {
                paragraphs.push(heading(kind));
                for exp in &record.experience {
                    push_entry(&mut paragraphs, exp.header_line(), &exp.bullets);
                }
            }
            SectionKind::Projects => {
                if let Some(projects) = record.visible_projects() {
                    paragraphs.push(heading(kind));
                    for project in projects {
                        push_entry(&mut paragraphs, project.header_line(), &project.bullets);
                    }
                }
            }
            SectionKind::Achievements => {
                paragraphs.push(heading(kind));
                paragraphs.extend(
                    record
                        .achievements
                        .iter()
                        .map(|a| RichParagraph::body(format!("{BULLET}{a}"), 100)),
                );
            }
        }
    }

    RichDocument {
        variant,
        font: style.document_font,
        paragraphs,
    }
}

/// Bold header line, one bullet paragraph per bullet, then an empty spacer.
fn push_entry(paragraphs: &mut Vec<RichParagraph>, header: String, bullets: &[String]) {
    paragraphs.push(RichParagraph::single(RichRun {
        text: header,
        size: BODY_SIZE,
        bold: true,
        color: None,
    })
    .after(100));
    paragraphs.extend(
        bullets
            .iter()
            .map(|b| RichParagraph::body(format!("{BULLET}{b}"), 50)),
    );
    paragraphs.push(RichParagraph::body(String::new(), 200));
}

// ────────────────────────────────────────────────────────────────────────────
// Packing
// ────────────────────────────────────────────────────────────────────────────

fn to_docx_paragraph(paragraph: &RichParagraph, font: &str) -> Paragraph {
    let mut p = Paragraph::new().line_spacing(
        LineSpacing::new()
            .before(paragraph.before)
            .after(paragraph.after),
    );
    if paragraph.align == Align::Center {
        p = p.align(AlignmentType::Center);
    }
    if paragraph.bottom_border {
        // bottom side only
        p = p.set_borders(
            ParagraphBorders::with_empty().set(
                ParagraphBorder::new(ParagraphBorderPosition::Bottom)
                    .val(BorderType::Single)
                    .size(6)
                    .space(1)
                    .color(RULE_COLOR),
            ),
        );
    }
    for run in &paragraph.runs {
        let mut r = Run::new()
            .add_text(run.text.as_str())
            .size(run.size)
            .fonts(RunFonts::new().ascii(font).hi_ansi(font).cs(font));
        if run.bold {
            r = r.bold();
        }
        if let Some(color) = &run.color {
            r = r.color(color.as_str());
        }
        p = p.add_run(r);
    }
    p
}

fn to_docx(document: &RichDocument) -> Docx {
    document
        .paragraphs
        .iter()
        .fold(Docx::new(), |docx, p| {
            docx.add_paragraph(to_docx_paragraph(p, document.font))
        })
}

/// Packs the document tree into `.docx` bytes.
pub fn pack_document(document: &RichDocument) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Cursor::new(Vec::new());
    to_docx(document)
        .build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Document(e.to_string()))?;
    Ok(buffer.into_inner())
}

pub fn export_docx(record: &ResumeRecord, variant: TemplateVariant) -> Result<Vec<u8>, ExportError> {
    pack_document(&build_document(record, variant))
}
