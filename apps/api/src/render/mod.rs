// Record renderers: the plain-text formatter and the visual template tree,
// both driven by the shared variant style table.

pub mod handlers;
pub mod style;
pub mod template;
pub mod text;

pub use text::format_resume_text;
