//! Axum route handlers for template listing and rendering.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::handlers::require_resume;
use crate::layout::{layout_tree, SurfaceSummary};
use crate::models::TemplateVariant;
use crate::render::style::{style_for, VariantStyle};
use crate::render::template::{render_tree, VisualTree};
use crate::session::ResumeSnapshot;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<&'static VariantStyle>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub variant: TemplateVariant,
    pub generation: u64,
    pub tree: VisualTree,
    pub surface: SurfaceSummary,
}

pub(crate) fn parse_variant(raw: &str) -> Result<TemplateVariant, AppError> {
    raw.parse().map_err(AppError::Validation)
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: TemplateVariant::ALL.iter().map(|v| style_for(*v)).collect(),
    })
}

/// POST /api/v1/resume/render/:variant
///
/// Renders the current record with `variant`, lays it out and stores the
/// surface so the PDF export for that variant can capture it.
pub async fn handle_render(
    State(state): State<AppState>,
    Path(variant): Path<String>,
) -> Result<Json<RenderResponse>, AppError> {
    let variant = parse_variant(&variant)?;
    let snapshot = require_resume(&state).await?;
    render_snapshot(&state, snapshot, variant).await.map(Json)
}

/// Renders `snapshot` and stores its surface. Fails when another record was
/// adopted in the meantime, since that surface could never be exported.
async fn render_snapshot(
    state: &AppState,
    snapshot: ResumeSnapshot,
    variant: TemplateVariant,
) -> Result<RenderResponse, AppError> {
    let record = Arc::clone(&snapshot.record);
    let page_config = state.page_config.clone();
    // Layout is CPU-bound; keep it off the async executor.
    let (tree, surface) = tokio::task::spawn_blocking(move || {
        let tree = render_tree(&record, variant);
        layout_tree(&tree, &page_config).map(|surface| (tree, surface))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))?
    .map_err(|e| AppError::Internal(e.into()))?;

    let summary = SurfaceSummary::from(&surface);
    let stored = state
        .session
        .store_surface(snapshot.generation, variant, Arc::new(surface))
        .await;
    if !stored {
        warn!(%variant, generation = snapshot.generation, "Render superseded by a newer resume");
        return Err(AppError::RenderSuperseded {
            rendered: snapshot.generation,
        });
    }
    info!(
        %variant,
        generation = snapshot.generation,
        height_px = summary.height_px,
        "Template rendered"
    );

    Ok(RenderResponse {
        variant,
        generation: snapshot.generation,
        tree,
        surface: summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_page_config;
    use crate::llm_client::mock::RecordingCapability;
    use crate::models::resume::fixtures::{jane_doe, jane_doe_with_project};
    use crate::session::ResumeSession;

    fn state() -> AppState {
        AppState {
            llm: Arc::new(RecordingCapability::failing("unused")),
            session: Arc::new(ResumeSession::new()),
            page_config: default_page_config(),
        }
    }

    async fn adopt(state: &AppState, record: crate::models::ResumeRecord) -> ResumeSnapshot {
        let guard = state.session.begin_generation().unwrap();
        let snapshot = state.session.adopt(&guard, record).await.unwrap();
        drop(guard);
        snapshot
    }

    #[tokio::test]
    async fn test_render_stores_surface_for_current_record() {
        let state = state();
        let snapshot = adopt(&state, jane_doe()).await;
        let response = render_snapshot(&state, snapshot, TemplateVariant::Classic)
            .await
            .unwrap();
        assert_eq!(response.generation, 1);
        assert!(state.session.surface(TemplateVariant::Classic).await.is_some());
    }

    #[tokio::test]
    async fn test_render_of_replaced_record_is_rejected() {
        let state = state();
        let old = adopt(&state, jane_doe()).await;
        adopt(&state, jane_doe_with_project()).await;

        let err = render_snapshot(&state, old, TemplateVariant::Modern)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RenderSuperseded { rendered: 1 }));
        assert!(state.session.surface(TemplateVariant::Modern).await.is_none());
    }
}
