// Artifact exporters: plain text, paginated PDF, and the rich-text document.
// Every exporter assembles the whole artifact in memory and only returns it
// once complete; a failed export leaves nothing behind.

pub mod docx;
pub mod handlers;
pub mod naming;
pub mod pdf;

use thiserror::Error;

use crate::models::TemplateVariant;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No rendered {variant} template to export. Render the resume first.")]
    MissingSurface { variant: TemplateVariant },

    #[error("The rendered template is empty")]
    EmptySurface,

    #[error("Failed to generate PDF: {0}")]
    Pdf(String),

    #[error("Failed to generate Word document: {0}")]
    Document(String),
}

/// A finished download.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
