//! Axum route handlers for downloads. Each one responds only after the whole
//! artifact is assembled.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::export::docx::export_docx;
use crate::export::naming::{text_file_name, variant_file_name};
use crate::export::pdf::export_pdf;
use crate::export::{
    Artifact, ExportError, DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE, TEXT_CONTENT_TYPE,
};
use crate::generation::handlers::require_resume;
use crate::render::format_resume_text;
use crate::render::handlers::parse_variant;
use crate::state::AppState;

/// `Content-Disposition` value with an ASCII `filename` fallback and the
/// exact name as an RFC 5987 `filename*` parameter.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .filter(|c| !matches!(c, '"' | '\\'))
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '_' })
        .collect();

    let mut encoded = String::with_capacity(file_name.len());
    for byte in file_name.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

fn attachment(artifact: Artifact) -> Response {
    let disposition = content_disposition(&artifact.file_name);
    (
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

fn join_error(e: tokio::task::JoinError) -> AppError {
    AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}"))
}

/// GET /api/v1/resume/export/txt
pub async fn handle_export_txt(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = require_resume(&state).await?;
    let artifact = Artifact {
        file_name: text_file_name(&snapshot.record),
        content_type: TEXT_CONTENT_TYPE,
        bytes: format_resume_text(&snapshot.record).into_bytes(),
    };
    info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "Text exported");
    Ok(attachment(artifact))
}

/// GET /api/v1/resume/export/pdf/:variant
///
/// Captures the surface stored by the last render of `variant`. Fails with an
/// export error when that variant has not been rendered for the current record.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(variant): Path<String>,
) -> Result<Response, AppError> {
    let variant = parse_variant(&variant)?;
    let (snapshot, surface) = state
        .session
        .surface(variant)
        .await
        .ok_or(ExportError::MissingSurface { variant })?;

    let page_config = state.page_config.clone();
    let title = snapshot.record.contact.name.clone();
    let pdf = tokio::task::spawn_blocking(move || export_pdf(&surface, &page_config, &title))
        .await
        .map_err(join_error)??;

    let artifact = Artifact {
        file_name: variant_file_name(&snapshot.record, variant, "pdf"),
        content_type: PDF_CONTENT_TYPE,
        bytes: pdf.bytes,
    };
    info!(
        file = %artifact.file_name,
        bytes = artifact.bytes.len(),
        pages = pdf.page_count,
        "PDF exported"
    );
    Ok(attachment(artifact))
}

/// GET /api/v1/resume/export/docx/:variant
///
/// Builds the document straight from the record; no render is needed first.
pub async fn handle_export_docx(
    State(state): State<AppState>,
    Path(variant): Path<String>,
) -> Result<Response, AppError> {
    let variant = parse_variant(&variant)?;
    let snapshot = require_resume(&state).await?;

    let record = std::sync::Arc::clone(&snapshot.record);
    let bytes = tokio::task::spawn_blocking(move || export_docx(&record, variant))
        .await
        .map_err(join_error)??;

    let artifact = Artifact {
        file_name: variant_file_name(&snapshot.record, variant, "docx"),
        content_type: DOCX_CONTENT_TYPE,
        bytes,
    };
    info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "Document exported");
    Ok(attachment(artifact))
}
