// Surface layout: positions a rendered visual tree on a fixed-width page
// surface using the embedded font faces. The surface is what PDF export captures.
// CPU-bound layout must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod page;
pub mod surface;

// Re-export the public API consumed by other modules (session, export, handlers).
pub use font_metrics::{font_book, FontFamily};
pub use page::{default_page_config, PageConfig};
pub use surface::{layout_tree, Surface, SurfaceSummary};
