use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lowest and highest ATS score a record may carry.
pub const ATS_SCORE_MIN: f64 = 0.0;
pub const ATS_SCORE_MAX: f64 = 100.0;

// ────────────────────────────────────────────────────────────────────────────
// Canonical résumé record
// ────────────────────────────────────────────────────────────────────────────

/// The structured résumé produced by one generation call.
///
/// Immutable once adopted by the session: renderers and exporters only ever
/// borrow it, and a new generation replaces the whole value.
/// `education` and `experience` keep the order the generator returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub contact: Contact,
    pub profile: String,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectEntry>>,
    pub achievements: Vec<String>,
    #[schemars(range(min = 0, max = 100))]
    pub ats_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Skills {
    pub technical: Vec<String>,
    pub analytical: Vec<String>,
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub bullets: Vec<String>,
}

impl ResumeRecord {
    /// Projects to render. Absent and empty are the same thing: `None`.
    pub fn visible_projects(&self) -> Option<&[ProjectEntry]> {
        self.projects.as_deref().filter(|p| !p.is_empty())
    }

    /// `phone | email | linkedin`, shared by every output format.
    pub fn contact_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.contact.phone, self.contact.email, self.contact.linkedin
        )
    }
}

impl EducationEntry {
    /// GPA if present and non-blank.
    pub fn gpa(&self) -> Option<&str> {
        self.gpa.as_deref().filter(|g| !g.trim().is_empty())
    }

    /// `institution | degree | duration[ | gpa]`
    pub fn summary_line(&self) -> String {
        let mut line = format!("{} | {} | {}", self.institution, self.degree, self.duration);
        if let Some(gpa) = self.gpa() {
            line.push_str(" | ");
            line.push_str(gpa);
        }
        line
    }
}

impl ExperienceEntry {
    /// `company | position | duration`
    pub fn header_line(&self) -> String {
        format!("{} | {} | {}", self.company, self.position, self.duration)
    }
}

impl ProjectEntry {
    /// `title | description`
    pub fn header_line(&self) -> String {
        format!("{} | {}", self.title, self.description)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ATS score
// ────────────────────────────────────────────────────────────────────────────

/// Result of forcing a generated score into `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedScore {
    pub value: f64,
    /// The out-of-range value the generator returned, if clamping happened.
    pub original: Option<f64>,
}

pub fn clamp_ats_score(raw: f64) -> ClampedScore {
    let value = raw.clamp(ATS_SCORE_MIN, ATS_SCORE_MAX);
    ClampedScore {
        value,
        original: (value != raw).then_some(raw),
    }
}

/// User-facing rating of an ATS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl AtsBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            AtsBand::Excellent
        } else if score >= 60.0 {
            AtsBand::Good
        } else {
            AtsBand::NeedsImprovement
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AtsBand::Excellent => "Excellent! Your resume is highly ATS-optimized.",
            AtsBand::Good => "Good score. Consider adding more keywords.",
            AtsBand::NeedsImprovement => {
                "Needs improvement. Add more quantified achievements and keywords."
            }
        }
    }
}

/// Score summary returned alongside a record.
#[derive(Debug, Clone, Serialize)]
pub struct AtsSummary {
    pub score: f64,
    pub band: AtsBand,
    pub message: &'static str,
}

impl AtsSummary {
    pub fn of(record: &ResumeRecord) -> Self {
        let band = AtsBand::for_score(record.ats_score);
        Self {
            score: record.ats_score,
            band,
            message: band.message(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test fixtures
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Jane Doe: one education entry, one two-bullet job, no projects.
    pub fn jane_doe() -> ResumeRecord {
        ResumeRecord {
            contact: Contact {
                name: "Jane Doe".to_string(),
                phone: "+1-555-0100".to_string(),
                email: "jane@example.com".to_string(),
                linkedin: "linkedin.com/in/janedoe".to_string(),
            },
            profile: "Analyst focused on data-driven decision-making.".to_string(),
            education: vec![EducationEntry {
                institution: "State University".to_string(),
                degree: "BSc Economics".to_string(),
                duration: "2019 – 2023".to_string(),
                gpa: Some("3.8 GPA".to_string()),
            }],
            skills: Skills {
                technical: vec!["Python".to_string(), "SQL".to_string()],
                analytical: vec!["Financial modeling".to_string()],
                soft: vec!["Communication".to_string()],
            },
            experience: vec![ExperienceEntry {
                company: "Acme Capital".to_string(),
                position: "Research Intern".to_string(),
                duration: "Jun 2023 – Aug 2023".to_string(),
                bullets: vec![
                    "Built market analysis dashboards used by 12 analysts".to_string(),
                    "Cut report turnaround by 30% through automation".to_string(),
                ],
            }],
            projects: None,
            achievements: vec!["1st Prize, Case Competition".to_string()],
            ats_score: 87.0,
        }
    }

    /// Jane Doe plus one project with a single bullet.
    pub fn jane_doe_with_project() -> ResumeRecord {
        ResumeRecord {
            projects: Some(vec![ProjectEntry {
                title: "EV Market Study".to_string(),
                description: "Market sizing model".to_string(),
                bullets: vec!["Forecast demand across 5 regions".to_string()],
            }]),
            ..jane_doe()
        }
    }

    /// A record long enough to spill over several PDF pages.
    pub fn long_career() -> ResumeRecord {
        let experience = (0..30)
            .map(|i| ExperienceEntry {
                company: format!("Company {i}"),
                position: "Analyst".to_string(),
                duration: "2020 – 2021".to_string(),
                bullets: vec![
                    "Delivered strategic research for leadership on market entry decisions"
                        .to_string(),
                    "Automated financial modeling workflows, saving 10 hours per week"
                        .to_string(),
                ],
            })
            .collect();
        ResumeRecord {
            experience,
            ..jane_doe()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_record_uses_camel_case_score_field() {
        let json = serde_json::to_value(jane_doe()).unwrap();
        assert!(json.get("atsScore").is_some());
        assert!(json.get("ats_score").is_none());
        // absent projects are not serialized
        assert!(json.get("projects").is_none());
    }

    #[test]
    fn test_record_missing_required_field_fails() {
        let mut json = serde_json::to_value(jane_doe()).unwrap();
        json.as_object_mut().unwrap().remove("achievements");
        let result: Result<ResumeRecord, _> = serde_json::from_value(json);
        assert!(result.is_err(), "achievements is required");
    }

    #[test]
    fn test_projects_and_gpa_are_optional() {
        let mut json = serde_json::to_value(jane_doe()).unwrap();
        json["education"][0].as_object_mut().unwrap().remove("gpa");
        let record: ResumeRecord = serde_json::from_value(json).unwrap();
        assert!(record.projects.is_none());
        assert!(record.education[0].gpa.is_none());
    }

    #[test]
    fn test_visible_projects_treats_empty_as_absent() {
        let mut record = jane_doe();
        assert!(record.visible_projects().is_none());
        record.projects = Some(vec![]);
        assert!(record.visible_projects().is_none());
        assert_eq!(jane_doe_with_project().visible_projects().unwrap().len(), 1);
    }

    #[test]
    fn test_education_summary_line_skips_blank_gpa() {
        let mut entry = jane_doe().education.remove(0);
        assert_eq!(
            entry.summary_line(),
            "State University | BSc Economics | 2019 – 2023 | 3.8 GPA"
        );
        entry.gpa = Some("  ".to_string());
        assert_eq!(
            entry.summary_line(),
            "State University | BSc Economics | 2019 – 2023"
        );
    }

    #[test]
    fn test_clamp_ats_score() {
        assert_eq!(clamp_ats_score(72.5), ClampedScore { value: 72.5, original: None });
        assert_eq!(
            clamp_ats_score(150.0),
            ClampedScore { value: 100.0, original: Some(150.0) }
        );
        assert_eq!(
            clamp_ats_score(-3.0),
            ClampedScore { value: 0.0, original: Some(-3.0) }
        );
    }

    #[test]
    fn test_ats_band_thresholds() {
        assert_eq!(AtsBand::for_score(80.0), AtsBand::Excellent);
        assert_eq!(AtsBand::for_score(79.9), AtsBand::Good);
        assert_eq!(AtsBand::for_score(60.0), AtsBand::Good);
        assert_eq!(AtsBand::for_score(12.0), AtsBand::NeedsImprovement);
    }

    #[test]
    fn test_schema_marks_required_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(ResumeRecord)).unwrap();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in ["contact", "profile", "education", "skills", "experience", "achievements", "atsScore"] {
            assert!(required.contains(&field), "{field} must be required");
        }
        assert!(!required.contains(&"projects"));
        assert_eq!(schema["properties"]["atsScore"]["maximum"], 100.0);
    }
}
