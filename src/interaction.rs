//! Interaction helpers for drag-to-pan and wheel-to-zoom.
//!
//! These helpers are used by render backends to implement consistent
//! interaction semantics across platforms.

use crate::geom::{Point, ScreenPoint};
use crate::transform::Transform;
use crate::view::Viewport;

/// Tracks a pressed pointer and reports movement since the last event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    last: Option<ScreenPoint>,
}

impl PointerTracker {
    /// Create a released tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag at `position`.
    pub fn press(&mut self, position: ScreenPoint) {
        self.last = Some(position);
    }

    /// Move to `position`, returning the pixel delta while pressed.
    pub fn drag_to(&mut self, position: ScreenPoint) -> Option<ScreenPoint> {
        let last = self.last?;
        self.last = Some(position);
        Some(ScreenPoint::new(position.x - last.x, position.y - last.y))
    }

    /// End the drag.
    pub fn release(&mut self) {
        self.last = None;
    }

    /// Check whether a drag is in progress.
    pub fn is_pressed(&self) -> bool {
        self.last.is_some()
    }
}

/// Convert a pixel drag into a math-space content delta.
///
/// Screen Y grows downward, so the vertical delta is negated. Returns
/// zero for an empty canvas.
pub fn pan_delta_from_drag(
    delta: ScreenPoint,
    viewport: Viewport,
    canvas_width: f64,
    canvas_height: f64,
) -> (f64, f64) {
    if !(canvas_width > 0.0 && canvas_height > 0.0) {
        return (0.0, 0.0);
    }
    let dx = delta.x * viewport.width() / canvas_width;
    let dy = -delta.y * viewport.height() / canvas_height;
    (dx, dy)
}

/// Zoom factor for a wheel event.
///
/// Positive `delta_y` (scrolling down) zooms out.
pub fn wheel_zoom_factor(delta_y: f64, intensity: f64) -> Option<f64> {
    if delta_y > 0.0 {
        Some(1.0 + intensity)
    } else if delta_y < 0.0 {
        Some(1.0 - intensity)
    } else {
        None
    }
}

/// Math point under the cursor, used as the wheel zoom center.
pub fn zoom_center(transform: &Transform, cursor: ScreenPoint) -> Point {
    transform.to_math(cursor)
}
