//! Raw-to-structured transformer: raw résumé text in, `ResumeRecord` out,
//! through exactly one call to the generation capability.
//!
//! The transformer never touches session state. The caller adopts the returned
//! record only on success, so a failed generation leaves the previous record
//! in place.

use schemars::schema_for;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::build_optimize_prompt;
use crate::llm_client::{GenerationCapability, GenerationRequest};
use crate::models::resume::clamp_ats_score;
use crate::models::ResumeRecord;

/// Raw résumé text that passed the precondition check (not blank).
#[derive(Debug, Clone)]
pub struct RawResume(String);

impl RawResume {
    pub fn parse(text: impl Into<String>) -> Result<Self, AppError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Please paste your raw resume content first.".to_string(),
            ));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// Something about the generated record the caller should know but that did
/// not make it unusable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum GenerationWarning {
    AtsScoreClamped { original: f64, clamped: f64 },
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub record: ResumeRecord,
    pub warnings: Vec<GenerationWarning>,
}

/// JSON schema of `ResumeRecord`, as sent to the capability.
pub fn resume_schema() -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(schema_for!(ResumeRecord))
}

pub fn build_request(raw: &RawResume) -> Result<GenerationRequest, AppError> {
    let schema = resume_schema().map_err(|e| AppError::Internal(e.into()))?;
    Ok(GenerationRequest {
        prompt: build_optimize_prompt(raw.as_str()),
        schema,
    })
}

/// Runs one generation. No retry, no caching: the same input calls again.
///
/// A response that does not deserialize into `ResumeRecord` (missing required
/// field, wrong type) is a generation failure. An out-of-range `atsScore` is
/// clamped into `[0, 100]` and reported as a warning.
pub async fn transform(
    raw: &RawResume,
    capability: &dyn GenerationCapability,
) -> Result<GenerationOutcome, AppError> {
    let request = build_request(raw)?;
    info!(chars = raw.char_count(), "Requesting resume generation");

    let value = capability
        .generate_object(&request)
        .await
        .map_err(|e| AppError::Generation(format!("Resume generation failed: {e}")))?;

    let mut record: ResumeRecord = serde_json::from_value(value).map_err(|e| {
        AppError::Generation(format!("Generated resume did not match the schema: {e}"))
    })?;

    let mut warnings = Vec::new();
    let score = clamp_ats_score(record.ats_score);
    if let Some(original) = score.original {
        warn!(original, clamped = score.value, "ATS score out of range, clamped");
        record.ats_score = score.value;
        warnings.push(GenerationWarning::AtsScoreClamped {
            original,
            clamped: score.value,
        });
    }

    Ok(GenerationOutcome { record, warnings })
}
