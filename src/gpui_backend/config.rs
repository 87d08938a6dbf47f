/// Configuration for the GPUI graph view.
#[derive(Debug, Clone)]
pub struct GraphViewConfig {
    /// Fractional zoom applied per wheel event.
    pub zoom_intensity: f64,
    /// Pixels per line for line-based scroll deltas.
    pub scroll_line_height_px: f32,
    /// Reset the viewport on double click.
    pub double_click_reset: bool,
}

impl Default for GraphViewConfig {
    fn default() -> Self {
        Self {
            zoom_intensity: 0.1,
            scroll_line_height_px: 16.0,
            double_click_reset: true,
        }
    }
}
