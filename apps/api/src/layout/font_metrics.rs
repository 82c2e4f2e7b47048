//! Font faces for the three résumé font families, with width measurement.
//!
//! Every face is an embedded DejaVu TrueType file. Layout measures text with
//! the same face the PDF exporter embeds, so the laid-out surface and the
//! exported PDF break lines at the same words.
//!
//! Characters the face has no glyph for measure zero and are not drawn.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ttf_parser::Face;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Modern template. DejaVu Sans.
    Sans,
    /// Classic template. DejaVu Serif.
    Serif,
    /// Minimal template. DejaVu Sans Mono.
    Mono,
}

impl FontFamily {
    const ALL: [FontFamily; 3] = [FontFamily::Sans, FontFamily::Serif, FontFamily::Mono];
}

#[derive(Debug, Clone, Error)]
#[error("embedded font face '{face}' failed to parse: {reason}")]
pub struct FontError {
    pub face: &'static str,
    pub reason: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Embedded files
// ────────────────────────────────────────────────────────────────────────────

macro_rules! face_file {
    ($name:literal) => {
        ($name, include_bytes!(concat!("../../assets/fonts/", $name)) as &'static [u8])
    };
}

/// `[regular, bold, italic, bold italic]` per family.
fn family_files(family: FontFamily) -> [(&'static str, &'static [u8]); 4] {
    match family {
        FontFamily::Sans => [
            face_file!("DejaVuSans.ttf"),
            face_file!("DejaVuSans-Bold.ttf"),
            face_file!("DejaVuSans-Oblique.ttf"),
            face_file!("DejaVuSans-BoldOblique.ttf"),
        ],
        FontFamily::Serif => [
            face_file!("DejaVuSerif.ttf"),
            face_file!("DejaVuSerif-Bold.ttf"),
            face_file!("DejaVuSerif-Italic.ttf"),
            face_file!("DejaVuSerif-BoldItalic.ttf"),
        ],
        FontFamily::Mono => [
            face_file!("DejaVuSansMono.ttf"),
            face_file!("DejaVuSansMono-Bold.ttf"),
            face_file!("DejaVuSansMono-Oblique.ttf"),
            face_file!("DejaVuSansMono-BoldOblique.ttf"),
        ],
    }
}

fn slot(bold: bool, italic: bool) -> usize {
    usize::from(bold) + 2 * usize::from(italic)
}

// ────────────────────────────────────────────────────────────────────────────
// Face metrics
// ────────────────────────────────────────────────────────────────────────────

/// One parsed face: the raw file for embedding plus its glyph advances.
#[derive(Debug)]
pub struct FontFace {
    pub name: &'static str,
    bytes: &'static [u8],
    face: Face<'static>,
    units_per_em: f32,
}

impl FontFace {
    fn parse(name: &'static str, bytes: &'static [u8]) -> Result<Self, FontError> {
        let face = Face::parse(bytes, 0).map_err(|e| FontError {
            face: name,
            reason: e.to_string(),
        })?;
        let units_per_em = f32::from(face.units_per_em());
        Ok(Self {
            name,
            bytes,
            face,
            units_per_em,
        })
    }

    /// The TrueType file, as embedded into exported PDFs.
    pub fn bytes(&self) -> &'static [u8] {
        self.bytes
    }

    pub fn covers(&self, c: char) -> bool {
        self.face.glyph_index(c).is_some()
    }

    /// Number of characters in `s` this face cannot draw.
    pub fn missing_chars(&self, s: &str) -> usize {
        s.chars().filter(|c| !c.is_whitespace() && !self.covers(*c)).count()
    }

    /// Width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        let units: u32 = s
            .chars()
            .filter_map(|c| self.face.glyph_index(c))
            .filter_map(|g| self.face.glyph_hor_advance(g))
            .map(u32::from)
            .sum();
        units as f32 / self.units_per_em
    }

    /// Width of `s` in pixels at `size_px`.
    pub fn width_px(&self, s: &str, size_px: f32) -> f32 {
        self.measure_str(s) * size_px
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_px`.
    ///
    /// A single word wider than the line gets a line of its own and overflows.
    /// Whitespace-only input yields no lines.
    pub fn wrap(&self, text: &str, size_px: f32, max_width_px: f32) -> Vec<String> {
        let space_w = self.width_px(" ", size_px);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.width_px(word, size_px);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width_px {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font book
// ────────────────────────────────────────────────────────────────────────────

/// All twelve faces, parsed once per process.
#[derive(Debug)]
pub struct FontBook {
    faces: Vec<FontFace>,
}

impl FontBook {
    fn load() -> Result<Self, FontError> {
        let mut faces = Vec::with_capacity(12);
        for family in FontFamily::ALL {
            for (name, bytes) in family_files(family) {
                faces.push(FontFace::parse(name, bytes)?);
            }
        }
        Ok(Self { faces })
    }

    pub fn face(&self, family: FontFamily, bold: bool, italic: bool) -> &FontFace {
        let family_index = match family {
            FontFamily::Sans => 0,
            FontFamily::Serif => 1,
            FontFamily::Mono => 2,
        };
        &self.faces[family_index * 4 + slot(bold, italic)]
    }
}

static FONT_BOOK: OnceLock<Result<FontBook, FontError>> = OnceLock::new();

/// The process-wide font book. Parsing happens on first use.
pub fn font_book() -> Result<&'static FontBook, FontError> {
    FONT_BOOK
        .get_or_init(FontBook::load)
        .as_ref()
        .map_err(Clone::clone)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn face(family: FontFamily, bold: bool) -> &'static FontFace {
        font_book().unwrap().face(family, bold, false)
    }

    #[test]
    fn test_every_face_parses() {
        let book = font_book().unwrap();
        for family in FontFamily::ALL {
            for (bold, italic) in [(false, false), (true, false), (false, true), (true, true)] {
                assert!(book.face(family, bold, italic).covers('A'));
            }
        }
        assert_eq!(book.face(FontFamily::Serif, false, true).name, "DejaVuSerif-Italic.ttf");
        assert_eq!(book.face(FontFamily::Mono, true, true).name, "DejaVuSansMono-BoldOblique.ttf");
    }

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(face(FontFamily::Sans, false).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_uses_glyph_advances() {
        // DejaVu Sans: R 1423 + u 1298 + s 1067 + t 803 = 4591 / 2048 em
        let width = face(FontFamily::Sans, false).measure_str("Rust");
        assert!((width - 2.2417).abs() < 1e-3, "Rust width should be ~2.2417, got {width}");
    }

    #[test]
    fn test_latin_extended_and_cyrillic_are_covered() {
        for family in FontFamily::ALL {
            let f = face(family, false);
            assert_eq!(f.missing_chars("Łukasz Ångström Дмитрий ≥ → ₹ • –"), 0);
            assert!(f.measure_str("Ł") > 0.0);
        }
    }

    #[test]
    fn test_uncovered_glyphs_measure_zero() {
        let f = face(FontFamily::Sans, false);
        assert_eq!(f.missing_chars("李雷 Lei"), 2);
        assert_eq!(f.measure_str("李雷"), 0.0);
        assert_eq!(f.measure_str("李雷 Lei"), f.measure_str(" Lei"));
    }

    #[test]
    fn test_mono_is_fixed_pitch() {
        let f = face(FontFamily::Mono, false);
        assert!((f.measure_str("iiii") - f.measure_str("WWWW")).abs() < 1e-6);
    }

    #[test]
    fn test_bold_is_wider_for_proportional_fonts() {
        assert!(
            face(FontFamily::Sans, true).width_px("Experience", 16.0)
                > face(FontFamily::Sans, false).width_px("Experience", 16.0)
        );
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let f = face(FontFamily::Sans, false);
        assert_eq!(f.wrap("Data analysis", 16.0, 700.0), vec!["Data analysis"]);
    }

    #[test]
    fn test_wrap_long_text_respects_width() {
        let f = face(FontFamily::Serif, false);
        let bullet = "Built a discounted cash flow model for three mid-cap acquisition targets \
                      and presented valuation ranges to the investment committee, \
                      informing a bid that closed 8% below the initial ask";
        let lines = f.wrap(bullet, 16.0, 300.0);
        assert!(lines.len() >= 3, "expected several lines, got {lines:?}");
        for line in &lines {
            assert!(f.width_px(line, 16.0) <= 300.0 || !line.contains(' '));
        }
        assert_eq!(lines.join(" "), bullet.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let f = face(FontFamily::Mono, false);
        let lines = f.wrap("a supercalifragilistic b", 10.0, 60.0);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_blank_yields_nothing() {
        assert!(face(FontFamily::Sans, false).wrap("   ", 16.0, 100.0).is_empty());
    }
}
