//! Plain-text résumé. One-way projection of the record; nothing parses it back.

use crate::models::ResumeRecord;
use crate::render::template::{SectionKind, SKILL_LABELS};

const BULLET: &str = "• ";

fn bulleted<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(|item| format!("{BULLET}{item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading(kind: SectionKind) -> String {
    kind.title().to_uppercase()
}

/// Formats the record as the plain-text résumé used for copy and `.txt` download.
///
/// Pure and total: the same record always yields the same string.
pub fn format_resume_text(record: &ResumeRecord) -> String {
    let mut out = String::new();

    out.push_str(&record.contact.name);
    out.push('\n');
    out.push_str(&record.contact_line());
    out.push_str("\n\n");

    out.push_str(&heading(SectionKind::Profile));
    out.push('\n');
    out.push_str(&record.profile);
    out.push_str("\n\n");

    out.push_str(&heading(SectionKind::Education));
    out.push('\n');
    let education: Vec<String> = record
        .education
        .iter()
        .map(|edu| format!("{BULLET}{}", edu.summary_line()))
        .collect();
    out.push_str(&education.join("\n"));
    out.push_str("\n\n");

    out.push_str(&heading(SectionKind::Skills));
    out.push('\n');
    let groups = [
        &record.skills.technical,
        &record.skills.analytical,
        &record.skills.soft,
    ];
    let skills: Vec<String> = SKILL_LABELS
        .iter()
        .zip(groups)
        .map(|(label, items)| format!("{label}: {}", items.join(", ")))
        .collect();
    out.push_str(&skills.join("\n"));
    out.push_str("\n\n");

    out.push_str(&heading(SectionKind::Experience));
    out.push('\n');
    let experience: Vec<String> = record
        .experience
        .iter()
        .map(|exp| format!("{}\n{}", exp.header_line(), bulleted(&exp.bullets)))
        .collect();
    out.push_str(&experience.join("\n\n"));
    out.push_str("\n\n");

    if let Some(projects) = record.visible_projects() {
        out.push_str(&heading(SectionKind::Projects));
        out.push('\n');
        let projects: Vec<String> = projects
            .iter()
            .map(|p| format!("{}\n{}", p.header_line(), bulleted(&p.bullets)))
            .collect();
        out.push_str(&projects.join("\n\n"));
        out.push_str("\n\n");
    }

    out.push_str(&heading(SectionKind::Achievements));
    out.push('\n');
    out.push_str(&bulleted(&record.achievements));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::{jane_doe, jane_doe_with_project};

    const JANE_DOE_TEXT: &str = "Jane Doe
+1-555-0100 | jane@example.com | linkedin.com/in/janedoe

PROFILE
Analyst focused on data-driven decision-making.

EDUCATION
• State University | BSc Economics | 2019 – 2023 | 3.8 GPA

SKILLS
Technical: Python, SQL
Analytical: Financial modeling
Soft Skills: Communication

EXPERIENCE
Acme Capital | Research Intern | Jun 2023 – Aug 2023
• Built market analysis dashboards used by 12 analysts
• Cut report turnaround by 30% through automation

ACHIEVEMENTS
• 1st Prize, Case Competition";

    #[test]
    fn test_jane_doe_matches_literal() {
        assert_eq!(format_resume_text(&jane_doe()), JANE_DOE_TEXT);
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let record = jane_doe_with_project();
        assert_eq!(format_resume_text(&record), format_resume_text(&record));
    }

    #[test]
    fn test_experience_has_one_header_and_two_bullets() {
        let text = format_resume_text(&jane_doe());
        let experience = text
            .split("EXPERIENCE\n")
            .nth(1)
            .and_then(|rest| rest.split("\n\n").next())
            .unwrap();
        let lines: Vec<_> = experience.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(!lines[0].starts_with(BULLET));
        assert!(lines[1..].iter().all(|l| l.starts_with(BULLET)));
    }

    #[test]
    fn test_projects_section_omitted_when_absent_or_empty() {
        let mut record = jane_doe();
        assert!(!format_resume_text(&record).contains("PROJECTS"));
        record.projects = Some(Vec::new());
        assert!(!format_resume_text(&record).contains("PROJECTS"));
    }

    #[test]
    fn test_projects_section_sits_between_experience_and_achievements() {
        let text = format_resume_text(&jane_doe_with_project());
        let experience = text.find("EXPERIENCE").unwrap();
        let projects = text.find("PROJECTS").unwrap();
        let achievements = text.find("ACHIEVEMENTS").unwrap();
        assert!(experience < projects && projects < achievements);
        assert!(text.contains(
            "PROJECTS\nEV Market Study | Market sizing model\n• Forecast demand across 5 regions\n\nACHIEVEMENTS"
        ));
    }

    #[test]
    fn test_education_without_gpa_has_no_trailing_separator() {
        let mut record = jane_doe();
        record.education[0].gpa = None;
        let text = format_resume_text(&record);
        assert!(text.contains("• State University | BSc Economics | 2019 – 2023\n"));
    }

    #[test]
    fn test_empty_skill_list_keeps_label() {
        let mut record = jane_doe();
        record.skills.soft.clear();
        assert!(format_resume_text(&record).contains("Soft Skills: \n"));
    }
}
