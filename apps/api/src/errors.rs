use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the triggering request only; the session
/// keeps serving afterwards.
#[derive(Debug, Error)]
pub enum AppError {
    /// Precondition failure, reported before any generation call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A resume generation is already in progress")]
    GenerationInProgress,

    #[error("Not found: {0}")]
    NotFound(String),

    /// A newer record was adopted while generation `rendered` was being laid out.
    #[error("Render of generation {rendered} was superseded")]
    RenderSuperseded { rendered: u64 },

    /// The generation capability failed or returned a malformed structure.
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str, String) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Input Required",
                msg.clone(),
            ),
            AppError::GenerationInProgress => (
                StatusCode::CONFLICT,
                "GENERATION_IN_PROGRESS",
                "Generation In Progress",
                "Wait for the current optimization to finish before starting another.".to_string(),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "No Resume Generated Yet",
                msg.clone(),
            ),
            AppError::RenderSuperseded { .. } => (
                StatusCode::CONFLICT,
                "RENDER_SUPERSEDED",
                "Resume Changed",
                "The resume was regenerated while this template was rendering. Render it again."
                    .to_string(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "Generation Failed",
                    "Please try again or check your input.".to_string(),
                )
            }
            AppError::Export(e) => {
                tracing::warn!("Export error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXPORT_FAILED",
                    "Export Failed",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal Error",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, title, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "title": title,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
