//! Viewport ownership with pan, zoom, and change notification.

use crate::error::ViewportError;
use crate::geom::Point;
use crate::view::Viewport;

/// Smallest allowed viewport width and height.
pub const MIN_ZOOM_RANGE: f64 = 1e-12;
/// Largest allowed viewport width and height.
pub const MAX_ZOOM_RANGE: f64 = 1e12;

type ViewportListener = Box<dyn FnMut(&Viewport) + Send + Sync>;

/// Owns the current viewport and applies pan/zoom deltas.
///
/// Every mutation bumps [`generation`](Self::generation) and then calls each
/// subscriber synchronously with the new viewport, in subscription order.
pub struct ViewportController {
    viewport: Viewport,
    generation: u64,
    listeners: Vec<ViewportListener>,
}

impl ViewportController {
    /// Create a controller starting at `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            generation: 0,
            listeners: Vec::new(),
        }
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mutation counter, starting at zero.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a callback invoked after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&Viewport) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.commit(viewport);
    }

    /// Restore the default `[-10, 10] × [-10, 10]` viewport.
    pub fn reset(&mut self) {
        self.commit(Viewport::default());
    }

    /// Move the content by a math-space delta.
    ///
    /// Both bounds of each axis shift by `-dx` / `-dy`. Deltas that would
    /// make a bound non-finite are ignored.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let x = self.viewport.x().shifted(-dx);
        let y = self.viewport.y().shifted(-dy);
        match Viewport::new(x, y) {
            Ok(next) => self.commit(next),
            Err(err) => tracing::warn!(%err, dx, dy, "ignoring pan"),
        }
    }

    /// Scale the viewport around `center`, or around its centroid.
    ///
    /// `factor > 1` zooms out. The factor is limited so that neither the
    /// width nor the height leaves `[MIN_ZOOM_RANGE, MAX_ZOOM_RANGE]`; the
    /// same limited factor is applied to both axes.
    pub fn zoom(&mut self, factor: f64, center: Option<Point>) -> Result<(), ViewportError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ViewportError::InvalidZoomFactor(factor));
        }
        let current = self.viewport;
        let center = center.unwrap_or_else(|| current.center());
        let effective = clamp_factor(clamp_factor(factor, current.width()), current.height());
        let next = Viewport::new(
            current.x().scaled(center.x, effective),
            current.y().scaled(center.y, effective),
        )?;
        self.commit(next);
        Ok(())
    }

    fn commit(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.generation = self.generation.wrapping_add(1);
        for listener in &mut self.listeners {
            listener(&self.viewport);
        }
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl std::fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("viewport", &self.viewport)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn clamp_factor(factor: f64, span: f64) -> f64 {
    let projected = span * factor;
    if projected < MIN_ZOOM_RANGE {
        MIN_ZOOM_RANGE / span
    } else if projected > MAX_ZOOM_RANGE {
        MAX_ZOOM_RANGE / span
    } else {
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn pan_moves_content_opposite_to_bounds() {
        let mut controller = ViewportController::default();
        controller.pan(2.0, -3.0);
        let viewport = controller.viewport();
        assert_eq!(viewport.x().min, -12.0);
        assert_eq!(viewport.x().max, 8.0);
        assert_eq!(viewport.y().min, -7.0);
        assert_eq!(viewport.y().max, 13.0);
    }

    #[test]
    fn pan_then_inverse_restores_viewport() {
        let start = Viewport::from_bounds(-3.5, 7.25, 0.125, 4.0).unwrap();
        let mut controller = ViewportController::new(start);
        controller.pan(1.5, -0.75);
        controller.pan(-1.5, 0.75);
        assert_eq!(controller.viewport(), start);
    }

    #[test]
    fn zoom_defaults_to_centroid() {
        let mut controller =
            ViewportController::new(Viewport::from_bounds(0.0, 4.0, 0.0, 2.0).unwrap());
        controller.zoom(0.5, None).unwrap();
        let viewport = controller.viewport();
        assert_relative_eq!(viewport.x().min, 1.0);
        assert_relative_eq!(viewport.x().max, 3.0);
        assert_relative_eq!(viewport.y().min, 0.5);
        assert_relative_eq!(viewport.y().max, 1.5);
    }

    #[test]
    fn zoom_keeps_cursor_point_fixed() {
        let mut controller = ViewportController::default();
        let cursor = Point::new(5.0, -2.0);
        controller.zoom(1.1, Some(cursor)).unwrap();
        let viewport = controller.viewport();
        let fx = (cursor.x - viewport.x().min) / viewport.width();
        let fy = (cursor.y - viewport.y().min) / viewport.height();
        assert_relative_eq!(fx, 0.75, max_relative = 1e-12);
        assert_relative_eq!(fy, 0.4, max_relative = 1e-12);
    }

    #[test]
    fn zoom_out_stops_at_max_range() {
        let mut controller = ViewportController::default();
        for _ in 0..100 {
            controller.zoom(2.0, None).unwrap();
            assert!(controller.viewport().width() <= MAX_ZOOM_RANGE * (1.0 + 1e-9));
        }
        assert_relative_eq!(controller.viewport().width(), MAX_ZOOM_RANGE, max_relative = 1e-9);
    }

    #[test]
    fn zoom_in_stops_at_min_range() {
        let mut controller = ViewportController::default();
        for _ in 0..100 {
            controller.zoom(0.5, None).unwrap();
            assert!(controller.viewport().width() >= MIN_ZOOM_RANGE * (1.0 - 1e-6));
        }
        assert_relative_eq!(controller.viewport().width(), MIN_ZOOM_RANGE, max_relative = 1e-3);
    }

    #[test]
    fn zoom_rejects_bad_factor_without_mutating() {
        let mut controller = ViewportController::default();
        assert!(controller.zoom(0.0, None).is_err());
        assert!(controller.zoom(f64::NAN, None).is_err());
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn every_mutation_notifies_subscribers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut controller = ViewportController::default();
        let counter = Arc::clone(&calls);
        controller.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        controller.pan(1.0, 1.0);
        controller.zoom(2.0, None).unwrap();
        controller.reset();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(controller.generation(), 3);
        assert_eq!(controller.viewport(), Viewport::default());
    }
}
