//! Render tuning shared by every backend.

use serde::{Deserialize, Serialize};

/// Sampling and styling parameters for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Target marching-squares cell size in pixels.
    pub cell_size_px: f64,
    /// Pixel stride between explicit-curve samples.
    pub explicit_stride_px: u32,
    /// Target spacing between grid lines in logical pixels.
    pub grid_spacing_px: f64,
    /// Ratio of physical to logical pixels.
    pub device_pixel_ratio: f64,
    /// Stroke width for curves.
    pub curve_line_width: f32,
    /// Stroke width for regular grid lines.
    pub grid_line_width: f32,
    /// Stroke width for the zero axes.
    pub axis_line_width: f32,
    /// Tick label font size in logical pixels.
    pub label_font_size: f32,
    /// Extra pixels around the canvas kept when clipping curves.
    pub clip_margin_px: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 6.0,
            explicit_stride_px: 2,
            grid_spacing_px: 100.0,
            device_pixel_ratio: 1.0,
            curve_line_width: 2.0,
            grid_line_width: 1.0,
            axis_line_width: 1.5,
            label_font_size: 10.0,
            clip_margin_px: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"cell_size_px": 4.0, "device_pixel_ratio": 2.0}"#).unwrap();
        assert_eq!(config.cell_size_px, 4.0);
        assert_eq!(config.device_pixel_ratio, 2.0);
        assert_eq!(config.explicit_stride_px, 2);
        assert_eq!(config.grid_spacing_px, 100.0);
    }
}
