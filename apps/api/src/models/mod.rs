pub mod resume;
pub mod variant;

pub use resume::{AtsSummary, ResumeRecord};
pub use variant::TemplateVariant;
