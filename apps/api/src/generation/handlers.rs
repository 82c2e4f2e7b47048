//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::transformer::{transform, GenerationWarning, RawResume};
use crate::models::{AtsSummary, ResumeRecord};
use crate::render::format_resume_text;
use crate::session::ResumeSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub raw_text: String,
}

/// Short title + description pair a client shows as a toast.
#[derive(Debug, Serialize)]
pub struct Notification {
    pub title: &'static str,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub generation: u64,
    pub generated_at: DateTime<Utc>,
    pub resume: ResumeRecord,
    pub ats: AtsSummary,
}

impl From<&ResumeSnapshot> for ResumeResponse {
    fn from(snapshot: &ResumeSnapshot) -> Self {
        Self {
            generation: snapshot.generation,
            generated_at: snapshot.generated_at,
            resume: snapshot.record.as_ref().clone(),
            ats: AtsSummary::of(&snapshot.record),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    #[serde(flatten)]
    pub resume: ResumeResponse,
    pub warnings: Vec<GenerationWarning>,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub raw_text: String,
    pub char_count: usize,
}

/// The current snapshot, or the "nothing generated yet" error.
pub(crate) async fn require_resume(state: &AppState) -> Result<ResumeSnapshot, AppError> {
    state.session.current().await.ok_or_else(|| {
        AppError::NotFound("Generate an optimized resume before using it.".to_string())
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/generate
///
/// Transforms raw text into a structured record and adopts it as the session's
/// résumé. Blank input is rejected before the generation capability is called.
/// While one generation is running, further requests get 409.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let raw = RawResume::parse(request.raw_text)?;

    let guard = state
        .session
        .begin_generation()
        .map_err(|_| AppError::GenerationInProgress)?;
    info!(ticket = guard.ticket(), "Generation started");

    // On failure the guard drops here and the previous record stays current.
    let outcome = transform(&raw, state.llm.as_ref()).await?;

    let snapshot = state
        .session
        .adopt(&guard, outcome.record)
        .await
        .map_err(|stale| {
            AppError::Generation(format!(
                "Generation {} was superseded by {}",
                stale.ticket, stale.latest
            ))
        })?;
    drop(guard);

    info!(
        generation = snapshot.generation,
        ats_score = snapshot.record.ats_score,
        "Resume adopted"
    );

    let resume = ResumeResponse::from(&snapshot);
    let notification = Notification {
        title: "Resume Optimized!",
        description: format!("ATS Score: {}/100", resume.ats.score),
    };
    Ok(Json(GenerateResponse {
        resume,
        warnings: outcome.warnings,
        notification,
    }))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeResponse>, AppError> {
    let snapshot = require_resume(&state).await?;
    Ok(Json(ResumeResponse::from(&snapshot)))
}

/// GET /api/v1/resume/text
///
/// The plain-text résumé, for copying to the clipboard.
pub async fn handle_get_text(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = require_resume(&state).await?;
    let text = format_resume_text(&snapshot.record);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

/// POST /api/v1/resume/extract
///
/// Accepts a multipart upload with a `file` field holding a PDF and returns its
/// text, ready to be sent to `generate`.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let mut pdf_bytes: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            pdf_bytes = Some(bytes);
            break;
        }
    }
    let bytes =
        pdf_bytes.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    // pdf-extract is synchronous and CPU-bound
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extract: {e}")))?
        .map_err(|e| AppError::Validation(format!("Failed to extract text from PDF: {e}")))?;

    let raw = RawResume::parse(text.trim())
        .map_err(|_| AppError::Validation("The uploaded PDF contains no text.".to_string()))?;
    info!(chars = raw.char_count(), "Extracted resume text from PDF");

    Ok(Json(ExtractResponse {
        char_count: raw.char_count(),
        raw_text: raw.as_str().to_string(),
    }))
}
