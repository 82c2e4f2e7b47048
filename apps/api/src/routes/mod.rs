pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(render::handle_list_templates))
        // Generation API
        .route("/api/v1/resume", get(generation::handle_get_resume))
        .route("/api/v1/resume/text", get(generation::handle_get_text))
        .route("/api/v1/resume/extract", post(generation::handle_extract))
        .route("/api/v1/resume/generate", post(generation::handle_generate))
        // Render API
        .route("/api/v1/resume/render/:variant", post(render::handle_render))
        // Export API
        .route("/api/v1/resume/export/txt", get(export::handle_export_txt))
        .route(
            "/api/v1/resume/export/pdf/:variant",
            get(export::handle_export_pdf),
        )
        .route(
            "/api/v1/resume/export/docx/:variant",
            get(export::handle_export_docx),
        )
        .with_state(state)
}
