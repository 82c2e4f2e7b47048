//! Variant style table: the single mapping from `TemplateVariant` to fonts,
//! colors, heading treatment, spacing and CSS class names.
//!
//! The visual renderer, the surface layout, the PDF exporter and the document
//! exporter all read from here; none of them branch on the variant for styling.

use serde::Serialize;

use crate::layout::FontFamily;
use crate::models::TemplateVariant;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    /// `RRGGBB`, uppercase, no leading `#`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Components scaled to `0.0..=1.0`.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingCase {
    Upper,
    AsWritten,
}

impl HeadingCase {
    pub fn apply(&self, title: &str) -> String {
        match self {
            HeadingCase::Upper => title.to_uppercase(),
            HeadingCase::AsWritten => title.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

/// How the three skill categories are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillDisplay {
    /// One tag chip per skill.
    Chips,
    /// `Label: a, b, c`
    Inline,
}

/// Sizes in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeScale {
    pub name: f32,
    pub contact: f32,
    pub heading: f32,
    pub body: f32,
    pub detail: f32,
    pub bullet: f32,
    pub line_height: f32,
}

/// Vertical spacing in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    pub header_gap: f32,
    pub name_gap: f32,
    pub section_gap: f32,
    pub heading_gap: f32,
    pub entry_gap: f32,
    pub bullet_indent: f32,
}

/// Tailwind class names for a browser rendering of the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassNames {
    pub container: &'static str,
    pub header: &'static str,
    pub name: &'static str,
    pub contact: &'static str,
    pub section: &'static str,
    pub section_title: &'static str,
    pub subsection: &'static str,
    pub company: &'static str,
    pub position: &'static str,
    pub duration: &'static str,
    pub bullet: &'static str,
    pub skills: &'static str,
    pub skill_tag: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChipStyle {
    pub background: Rgb,
    pub text: Rgb,
    pub pad_x: f32,
    pub pad_y: f32,
    pub gap: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariantStyle {
    pub variant: TemplateVariant,
    /// Font used for layout metrics and the PDF builtin font.
    pub font: FontFamily,
    /// Font family name written into the rich-text document.
    pub document_font: &'static str,
    pub text_color: Rgb,
    pub muted_color: Rgb,
    /// Section heading color in every output.
    pub accent_color: Rgb,
    pub heading_case: HeadingCase,
    /// Rule under each section heading.
    pub heading_rule: Option<Rgb>,
    /// Rule under the name/contact header.
    pub header_rule: Option<Rgb>,
    pub header_align: Align,
    pub position_italic: bool,
    pub skill_display: SkillDisplay,
    pub chip: ChipStyle,
    pub scale: TypeScale,
    pub spacing: Spacing,
    pub classes: ClassNames,
}

const BLUE_600: Rgb = Rgb(0x25, 0x63, 0xEB);
const GRAY_300: Rgb = Rgb(0xD1, 0xD5, 0xDB);
const GRAY_600: Rgb = Rgb(0x4B, 0x55, 0x63);
const GRAY_800: Rgb = Rgb(0x1F, 0x29, 0x37);
const GRAY_900: Rgb = Rgb(0x11, 0x18, 0x27);

const BLUE_CHIP: ChipStyle = ChipStyle {
    background: Rgb(0xDB, 0xEA, 0xFE),
    text: Rgb(0x1E, 0x40, 0xAF),
    pad_x: 8.0,
    pad_y: 4.0,
    gap: 8.0,
};

static MODERN: VariantStyle = VariantStyle {
    variant: TemplateVariant::Modern,
    font: FontFamily::Sans,
    document_font: "Calibri",
    text_color: GRAY_800,
    muted_color: GRAY_600,
    accent_color: BLUE_600,
    heading_case: HeadingCase::Upper,
    heading_rule: None,
    header_rule: Some(BLUE_600),
    header_align: Align::Center,
    position_italic: true,
    skill_display: SkillDisplay::Chips,
    chip: BLUE_CHIP,
    scale: TypeScale {
        name: 30.0,
        contact: 14.0,
        heading: 20.0,
        body: 16.0,
        detail: 14.0,
        bullet: 16.0,
        line_height: 1.5,
    },
    spacing: Spacing {
        header_gap: 24.0,
        name_gap: 8.0,
        section_gap: 24.0,
        heading_gap: 12.0,
        entry_gap: 16.0,
        bullet_indent: 16.0,
    },
    classes: ClassNames {
        container: "bg-white p-8 max-w-4xl mx-auto font-sans text-gray-800",
        header: "text-center mb-6 pb-4 border-b-2 border-blue-600",
        name: "text-3xl font-bold text-gray-900 mb-2",
        contact: "text-gray-600 text-sm",
        section: "mb-6",
        section_title: "text-xl font-bold text-blue-600 mb-3 uppercase tracking-wide",
        subsection: "mb-4",
        company: "font-semibold text-gray-900",
        position: "text-gray-700 italic",
        duration: "text-gray-600 text-sm",
        bullet: "text-gray-700 ml-4 mb-1",
        skills: "flex flex-wrap gap-2",
        skill_tag: "bg-blue-100 text-blue-800 px-2 py-1 rounded text-sm",
    },
};

static CLASSIC: VariantStyle = VariantStyle {
    variant: TemplateVariant::Classic,
    font: FontFamily::Serif,
    document_font: "Times New Roman",
    text_color: GRAY_900,
    muted_color: GRAY_600,
    accent_color: Rgb::BLACK,
    heading_case: HeadingCase::AsWritten,
    heading_rule: Some(GRAY_300),
    header_rule: None,
    header_align: Align::Center,
    position_italic: false,
    skill_display: SkillDisplay::Inline,
    chip: BLUE_CHIP,
    scale: TypeScale {
        name: 30.0,
        contact: 16.0,
        heading: 18.0,
        body: 16.0,
        detail: 16.0,
        bullet: 16.0,
        line_height: 1.5,
    },
    spacing: Spacing {
        header_gap: 24.0,
        name_gap: 8.0,
        section_gap: 24.0,
        heading_gap: 12.0,
        entry_gap: 16.0,
        bullet_indent: 16.0,
    },
    classes: ClassNames {
        container: "bg-white p-8 max-w-4xl mx-auto font-serif text-gray-900",
        header: "text-center mb-6",
        name: "text-3xl font-bold mb-2",
        contact: "text-gray-700",
        section: "mb-6",
        section_title: "text-lg font-bold mb-3 border-b border-gray-300 pb-1",
        subsection: "mb-4",
        company: "font-bold",
        position: "font-medium",
        duration: "text-gray-600",
        bullet: "text-gray-800 ml-4 mb-1",
        skills: "text-gray-800",
        skill_tag: "",
    },
};

static MINIMAL: VariantStyle = VariantStyle {
    variant: TemplateVariant::Minimal,
    font: FontFamily::Mono,
    document_font: "Courier New",
    text_color: GRAY_900,
    muted_color: GRAY_600,
    accent_color: Rgb::BLACK,
    heading_case: HeadingCase::Upper,
    heading_rule: None,
    header_rule: None,
    header_align: Align::Left,
    position_italic: false,
    skill_display: SkillDisplay::Inline,
    chip: BLUE_CHIP,
    scale: TypeScale {
        name: 24.0,
        contact: 14.0,
        heading: 14.0,
        body: 16.0,
        detail: 14.0,
        bullet: 14.0,
        line_height: 1.5,
    },
    spacing: Spacing {
        header_gap: 32.0,
        name_gap: 4.0,
        section_gap: 24.0,
        heading_gap: 12.0,
        entry_gap: 12.0,
        bullet_indent: 0.0,
    },
    classes: ClassNames {
        container: "bg-white p-8 max-w-4xl mx-auto font-mono text-gray-900",
        header: "mb-8",
        name: "text-2xl font-bold mb-1",
        contact: "text-gray-600 text-sm",
        section: "mb-6",
        section_title: "text-sm font-bold uppercase tracking-widest mb-3",
        subsection: "mb-3",
        company: "font-medium",
        position: "text-gray-700",
        duration: "text-gray-500 text-sm",
        bullet: "text-gray-800 text-sm mb-1",
        skills: "text-gray-800 text-sm",
        skill_tag: "",
    },
};

/// Returns the style bundle for a variant.
pub fn style_for(variant: TemplateVariant) -> &'static VariantStyle {
    match variant {
        TemplateVariant::Modern => &MODERN,
        TemplateVariant::Classic => &CLASSIC,
        TemplateVariant::Minimal => &MINIMAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_for_returns_matching_variant() {
        for variant in TemplateVariant::ALL {
            assert_eq!(style_for(variant).variant, variant);
        }
    }

    #[test]
    fn test_only_modern_uses_chips_and_accent() {
        assert_eq!(style_for(TemplateVariant::Modern).skill_display, SkillDisplay::Chips);
        assert_eq!(style_for(TemplateVariant::Modern).accent_color.hex(), "2563EB");
        for variant in [TemplateVariant::Classic, TemplateVariant::Minimal] {
            assert_eq!(style_for(variant).skill_display, SkillDisplay::Inline);
            assert_eq!(style_for(variant).accent_color.hex(), "000000");
        }
    }

    #[test]
    fn test_only_classic_rules_headings() {
        assert!(style_for(TemplateVariant::Classic).heading_rule.is_some());
        assert!(style_for(TemplateVariant::Modern).heading_rule.is_none());
        assert!(style_for(TemplateVariant::Minimal).heading_rule.is_none());
    }

    #[test]
    fn test_document_fonts_follow_layout_fonts() {
        let pairs: Vec<_> = TemplateVariant::ALL
            .iter()
            .map(|v| (style_for(*v).font, style_for(*v).document_font))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (FontFamily::Sans, "Calibri"),
                (FontFamily::Serif, "Times New Roman"),
                (FontFamily::Mono, "Courier New"),
            ]
        );
    }

    #[test]
    fn test_heading_case() {
        assert_eq!(HeadingCase::Upper.apply("Experience"), "EXPERIENCE");
        assert_eq!(HeadingCase::AsWritten.apply("Experience"), "Experience");
    }

    #[test]
    fn test_rgb_unit_range() {
        let (r, g, b) = Rgb(255, 0, 51).unit();
        assert!((r - 1.0).abs() < 1e-6);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }
}
