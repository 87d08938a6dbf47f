//! Light and dark themes for the grid and axes.

use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Visual theme shared by the grid, axes and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Surface background.
    pub background: Color,
    /// Regular grid lines.
    pub grid: Color,
    /// Zero axis lines.
    pub axis: Color,
    /// Tick label text.
    pub label: Color,
}

impl Theme {
    /// Light theme.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            grid: Color::hex(0xe5e7eb),
            axis: Color::hex(0x374151),
            label: Color::hex(0x9ca3af),
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::hex(0x09090b),
            grid: Color::hex(0x27272a),
            axis: Color::hex(0xe2e8f0),
            label: Color::hex(0x9ca3af),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
