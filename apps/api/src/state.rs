use std::sync::Arc;

use crate::layout::PageConfig;
use crate::llm_client::GenerationCapability;
use crate::session::ResumeSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generation capability. Default: LlmClient. Tests inject a mock.
    pub llm: Arc<dyn GenerationCapability>,
    /// The session-held résumé and its rendered surfaces.
    pub session: Arc<ResumeSession>,
    /// Surface width and A4 capture geometry shared by render and PDF export.
    pub page_config: PageConfig,
}
