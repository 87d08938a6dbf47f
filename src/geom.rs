//! Geometric primitives used by the graphing pipeline.
//!
//! [`Point`] lives in math space. [`ScreenPoint`] and [`ScreenRect`] live in
//! pixel space, with the origin at the top-left corner and Y growing down.

use serde::{Deserialize, Serialize};

/// A point in math space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X value in math coordinates.
    pub x: f64,
    /// Y value in math coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new math-space point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the origin.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in pixels.
    pub x: f64,
    /// Y value in pixels.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin with the given size.
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(width, height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive, finite area.
    pub fn is_valid(&self) -> bool {
        let (width, height) = (self.width(), self.height());
        width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
    }

    /// Grow the rectangle by `margin` pixels on every side.
    pub fn inflate(&self, margin: f64) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x - margin, self.min.y - margin),
            ScreenPoint::new(self.max.x + margin, self.max.y + margin),
        )
    }

    /// Check whether the point lies inside the rectangle, edges included.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check whether either side is zero, negative or not finite.
    pub fn is_empty(&self) -> bool {
        !ScreenRect::from_size(self.width, self.height).is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_rect_is_invalid() {
        assert!(!ScreenRect::from_size(0.0, 100.0).is_valid());
        assert!(!ScreenRect::from_size(100.0, 0.0).is_valid());
        assert!(ScreenRect::from_size(1.0, 1.0).is_valid());
    }

    #[test]
    fn inflate_grows_both_corners() {
        let rect = ScreenRect::from_size(10.0, 20.0).inflate(2.0);
        assert_eq!(rect.min, ScreenPoint::new(-2.0, -2.0));
        assert_eq!(rect.max, ScreenPoint::new(12.0, 22.0));
        assert!(rect.contains(ScreenPoint::new(-1.0, 21.0)));
    }
}
