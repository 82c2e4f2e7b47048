use serde::{Deserialize, Serialize};

/// Geometry shared by the surface layout and the PDF capture.
///
/// The surface is laid out in CSS pixels at a fixed width; the capture scales
/// it by `capture_scale` and maps the capture width onto the page width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Surface width in CSS pixels (A4 at 96 dpi).
    pub surface_width_px: f32,
    /// Inner padding on every side of the surface.
    pub padding_px: f32,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Upscale factor applied when the surface is captured.
    pub capture_scale: f32,
}

/// A4 portrait, 794 px surface with 32 px padding, captured at 2x.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        surface_width_px: 794.0,
        padding_px: 32.0,
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        capture_scale: 2.0,
    }
}

impl PageConfig {
    /// Width available to content inside the padding.
    pub fn content_width_px(&self) -> f32 {
        self.surface_width_px - 2.0 * self.padding_px
    }

    /// Millimetres per captured pixel once the capture width is fitted to the page.
    pub fn mm_per_capture_px(&self) -> f32 {
        self.page_width_mm / (self.surface_width_px * self.capture_scale)
    }

    /// Millimetres per surface pixel.
    pub fn mm_per_surface_px(&self) -> f32 {
        self.mm_per_capture_px() * self.capture_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_config_sanity() {
        let config = default_page_config();
        assert_eq!(config.surface_width_px, 794.0);
        assert_eq!(config.capture_scale, 2.0);
        assert!((config.content_width_px() - 730.0).abs() < 1e-4);
    }

    #[test]
    fn test_capture_width_maps_to_page_width() {
        let config = default_page_config();
        let capture_width = config.surface_width_px * config.capture_scale;
        assert!((capture_width * config.mm_per_capture_px() - config.page_width_mm).abs() < 1e-3);
        assert!((config.surface_width_px * config.mm_per_surface_px() - 210.0).abs() < 1e-3);
    }
}
