//! Coordinate transforms between math and screen space.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::Viewport;

/// Affine map between a math-space viewport and a pixel rectangle.
///
/// The Y axis is flipped: larger math Y maps to smaller pixel Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    viewport: Viewport,
    screen: ScreenRect,
}

impl Transform {
    /// Create a transform for the given viewport and screen rectangle.
    ///
    /// Returns `None` when the screen rectangle has no area.
    pub fn new(viewport: Viewport, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() {
            return None;
        }
        Some(Self { viewport, screen })
    }

    /// Transform onto a canvas of the given size anchored at the origin.
    pub fn for_canvas(viewport: Viewport, width: f64, height: f64) -> Option<Self> {
        Self::new(viewport, ScreenRect::from_size(width, height))
    }

    /// Access the viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the screen rectangle.
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a math point into screen space.
    pub fn to_pixel(&self, point: Point) -> ScreenPoint {
        let x = self.viewport.x();
        let y = self.viewport.y();
        let x_norm = (point.x - x.min) / x.span();
        let y_norm = (point.y - y.min) / y.span();
        ScreenPoint::new(
            self.screen.min.x + x_norm * self.screen.width(),
            self.screen.max.y - y_norm * self.screen.height(),
        )
    }

    /// Map a screen point into math space.
    pub fn to_math(&self, point: ScreenPoint) -> Point {
        let x = self.viewport.x();
        let y = self.viewport.y();
        let x_norm = (point.x - self.screen.min.x) / self.screen.width();
        let y_norm = (self.screen.max.y - point.y) / self.screen.height();
        Point::new(x.min + x_norm * x.span(), y.min + y_norm * y.span())
    }

    /// Pixel Y for a math Y value.
    pub fn y_to_pixel(&self, y: f64) -> f64 {
        let range = self.viewport.y();
        self.screen.max.y - (y - range.min) / range.span() * self.screen.height()
    }

    /// Horizontal pixels per math unit.
    pub fn pixels_per_unit_x(&self) -> f64 {
        self.screen.width() / self.viewport.width()
    }

    /// Vertical pixels per math unit.
    pub fn pixels_per_unit_y(&self) -> f64 {
        self.screen.height() / self.viewport.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn transform(viewport: Viewport, width: f64, height: f64) -> Transform {
        Transform::for_canvas(viewport, width, height).expect("valid transform")
    }

    #[test]
    fn linear_roundtrip() {
        let viewport = Viewport::from_bounds(0.0, 10.0, 0.0, 10.0).unwrap();
        let transform = transform(viewport, 100.0, 100.0);
        let point = Point::new(5.0, 7.5);
        let screen = transform.to_pixel(point);
        assert_relative_eq!(screen.x, 50.0);
        assert_relative_eq!(screen.y, 25.0);
        let roundtrip = transform.to_math(screen);
        assert_relative_eq!(roundtrip.x, point.x, max_relative = 1e-9);
        assert_relative_eq!(roundtrip.y, point.y, max_relative = 1e-9);
    }

    #[test]
    fn corners_map_to_canvas_corners() {
        let viewport = Viewport::from_bounds(-2.0, 2.0, -1.0, 3.0).unwrap();
        let transform = transform(viewport, 400.0, 200.0);
        assert_eq!(
            transform.to_pixel(Point::new(-2.0, 3.0)),
            ScreenPoint::new(0.0, 0.0)
        );
        assert_eq!(
            transform.to_pixel(Point::new(2.0, -1.0)),
            ScreenPoint::new(400.0, 200.0)
        );
    }

    #[test]
    fn offset_screen_rect_roundtrip() {
        let viewport = Viewport::from_bounds(-1e6, 3e6, 1e-3, 2e-3).unwrap();
        let screen = ScreenRect::new(ScreenPoint::new(40.0, 10.0), ScreenPoint::new(840.0, 610.0));
        let transform = Transform::new(viewport, screen).unwrap();
        for point in [
            Point::new(0.0, 0.0015),
            Point::new(-5e6, 9.0),
            Point::new(1.25e6, -0.25),
        ] {
            let back = transform.to_math(transform.to_pixel(point));
            assert_relative_eq!(back.x, point.x, epsilon = 1e-9, max_relative = 1e-9);
            assert_relative_eq!(back.y, point.y, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn zero_sized_canvas_has_no_transform() {
        let viewport = Viewport::default();
        assert!(Transform::for_canvas(viewport, 0.0, 100.0).is_none());
        assert!(Transform::for_canvas(viewport, 100.0, 0.0).is_none());
    }
}
