//! Visual template renderer: `(ResumeRecord, TemplateVariant) -> VisualTree`.
//!
//! The tree is what a browser would draw and what `layout::surface` positions
//! for PDF capture. Section order is fixed and matches the text formatter.

use serde::Serialize;

use crate::models::resume::EducationEntry;
use crate::models::{ResumeRecord, TemplateVariant};
use crate::render::style::{style_for, Align, SkillDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Profile,
    Education,
    Skills,
    Experience,
    Projects,
    Achievements,
}

impl SectionKind {
    /// Rendering order shared by every output format.
    pub const ORDER: [SectionKind; 6] = [
        SectionKind::Profile,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Achievements,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Profile => "Profile",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Experience => "Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Achievements => "Achievements",
        }
    }
}

/// The three skill categories with their display labels.
pub const SKILL_LABELS: [&str; 3] = ["Technical", "Analytical", "Soft Skills"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    pub variant: TemplateVariant,
    pub class_name: &'static str,
    pub header: HeaderNode,
    pub sections: Vec<SectionNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderNode {
    pub name: String,
    pub contact: String,
    pub align: Align,
    pub class_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionNode {
    pub kind: SectionKind,
    /// Heading text after the variant's case rule.
    pub heading: String,
    pub class_name: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    Entry(EntryNode),
    SkillGroup(SkillGroupNode),
    Bullets { items: Vec<String> },
}

/// An education, experience or project entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryNode {
    /// Institution, company or project title.
    pub title: String,
    /// Degree, position or project description.
    pub subtitle: String,
    /// Right-aligned duration (plus GPA for education).
    pub meta: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroupNode {
    pub label: &'static str,
    pub display: SkillDisplay,
    pub items: Vec<String>,
}

impl SkillGroupNode {
    /// `a, b, c`: the inline rendering.
    pub fn joined(&self) -> String {
        self.items.join(", ")
    }
}

impl VisualTree {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionNode> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Builds the visual tree for `variant`. Pure; the record is only borrowed.
pub fn render_tree(record: &ResumeRecord, variant: TemplateVariant) -> VisualTree {
    let style = style_for(variant);

    let sections = SectionKind::ORDER
        .iter()
        .filter_map(|kind| {
            let blocks = section_blocks(record, *kind, style.skill_display)?;
            Some(SectionNode {
                kind: *kind,
                heading: style.heading_case.apply(kind.title()),
                class_name: style.classes.section,
                blocks,
            })
        })
        .collect();

    VisualTree {
        variant,
        class_name: style.classes.container,
        header: HeaderNode {
            name: record.contact.name.clone(),
            contact: record.contact_line(),
            align: style.header_align,
            class_name: style.classes.header,
        },
        sections,
    }
}

/// `None` means the section is skipped entirely, heading included.
fn section_blocks(
    record: &ResumeRecord,
    kind: SectionKind,
    skill_display: SkillDisplay,
) -> Option<Vec<Block>> {
    let blocks = match kind {
        SectionKind::Profile => vec![Block::Paragraph {
            text: record.profile.clone(),
        }],
        SectionKind::Education => record.education.iter().map(education_entry).collect(),
        SectionKind::Skills => {
            let groups = [
                &record.skills.technical,
                &record.skills.analytical,
                &record.skills.soft,
            ];
            SKILL_LABELS
                .iter()
                .zip(groups)
                .map(|(label, items)| {
                    Block::SkillGroup(SkillGroupNode {
                        label,
                        display: skill_display,
                        items: items.clone(),
                    })
                })
                .collect()
        }
        SectionKind::Experience => record
            .experience
            .iter()
            .map(|exp| {
                Block::Entry(EntryNode {
                    title: exp.company.clone(),
                    subtitle: exp.position.clone(),
                    meta: Some(exp.duration.clone()),
                    bullets: exp.bullets.clone(),
                })
            })
            .collect(),
        SectionKind::Projects => record
            .visible_projects()?
            .iter()
            .map(|project| {
                Block::Entry(EntryNode {
                    title: project.title.clone(),
                    subtitle: project.description.clone(),
                    meta: None,
                    bullets: project.bullets.clone(),
                })
            })
            .collect(),
        SectionKind::Achievements => vec![Block::Bullets {
            items: record.achievements.clone(),
        }],
    };
    Some(blocks)
}

fn education_entry(edu: &EducationEntry) -> Block {
    let meta = match edu.gpa() {
        Some(gpa) => format!("{} | {}", edu.duration, gpa),
        None => edu.duration.clone(),
    };
    Block::Entry(EntryNode {
        title: edu.institution.clone(),
        subtitle: edu.degree.clone(),
        meta: Some(meta),
        bullets: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::{jane_doe, jane_doe_with_project};

    fn kinds(tree: &VisualTree) -> Vec<SectionKind> {
        tree.sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let tree = render_tree(&jane_doe_with_project(), TemplateVariant::Classic);
        assert_eq!(kinds(&tree), SectionKind::ORDER.to_vec());
    }

    #[test]
    fn test_projects_omitted_when_absent_or_empty() {
        let mut record = jane_doe();
        for variant in TemplateVariant::ALL {
            let tree = render_tree(&record, variant);
            assert!(tree.section(SectionKind::Projects).is_none());
        }

        record.projects = Some(Vec::new());
        for variant in TemplateVariant::ALL {
            let tree = render_tree(&record, variant);
            assert!(tree.section(SectionKind::Projects).is_none());
            assert_eq!(tree.sections.len(), 5);
        }
    }

    #[test]
    fn test_modern_renders_chips_others_inline() {
        let record = jane_doe();
        for variant in TemplateVariant::ALL {
            let tree = render_tree(&record, variant);
            let skills = tree.section(SectionKind::Skills).unwrap();
            let expected = if variant == TemplateVariant::Modern {
                SkillDisplay::Chips
            } else {
                SkillDisplay::Inline
            };
            assert_eq!(skills.blocks.len(), 3);
            for block in &skills.blocks {
                match block {
                    Block::SkillGroup(group) => assert_eq!(group.display, expected),
                    other => panic!("unexpected block in skills: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_heading_case_per_variant() {
        let record = jane_doe();
        let modern = render_tree(&record, TemplateVariant::Modern);
        let classic = render_tree(&record, TemplateVariant::Classic);
        let minimal = render_tree(&record, TemplateVariant::Minimal);
        assert_eq!(modern.sections[0].heading, "PROFILE");
        assert_eq!(classic.sections[0].heading, "Profile");
        assert_eq!(minimal.sections[0].heading, "PROFILE");
        assert_eq!(minimal.header.align, Align::Left);
        assert_eq!(classic.header.align, Align::Center);
    }

    #[test]
    fn test_education_meta_carries_gpa() {
        let tree = render_tree(&jane_doe(), TemplateVariant::Minimal);
        let education = tree.section(SectionKind::Education).unwrap();
        match &education.blocks[0] {
            Block::Entry(entry) => {
                assert_eq!(entry.title, "State University");
                assert_eq!(entry.meta.as_deref(), Some("2019 – 2023 | 3.8 GPA"));
                assert!(entry.bullets.is_empty());
            }
            other => panic!("expected entry, got {other:?}"),
        }
    }

    #[test]
    fn test_experience_order_preserved() {
        let record = crate::models::resume::fixtures::long_career();
        let tree = render_tree(&record, TemplateVariant::Modern);
        let titles: Vec<_> = tree
            .section(SectionKind::Experience)
            .unwrap()
            .blocks
            .iter()
            .map(|b| match b {
                Block::Entry(e) => e.title.clone(),
                _ => unreachable!(),
            })
            .collect();
        let expected: Vec<_> = record.experience.iter().map(|e| e.company.clone()).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_tree_serializes_with_block_tags() {
        let tree = render_tree(&jane_doe(), TemplateVariant::Modern);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["variant"], "modern");
        assert_eq!(json["sections"][0]["blocks"][0]["type"], "paragraph");
        assert_eq!(json["sections"][2]["blocks"][0]["type"], "skill_group");
        assert_eq!(json["sections"][2]["blocks"][0]["display"], "chips");
    }
}
