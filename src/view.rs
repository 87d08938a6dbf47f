//! Viewport rectangles and numeric ranges.

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::ViewportError;
use crate::geom::Point;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range. Bounds are taken as given.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.min < self.max
    }

    /// Shift both bounds by `delta`.
    pub fn shifted(&self, delta: f64) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }

    /// Scale the range around `center`.
    pub fn scaled(&self, center: f64, factor: f64) -> Self {
        Self::new(
            center + (self.min - center) * factor,
            center + (self.max - center) * factor,
        )
    }

    fn validate(self, axis: Axis) -> Result<Self, ViewportError> {
        if !self.is_finite() {
            return Err(ViewportError::NonFinite {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        if self.min >= self.max {
            return Err(ViewportError::EmptyRange {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        Ok(self)
    }
}

/// Visible math-space rectangle.
///
/// Both ranges are finite with `min < max`; the constructors reject
/// anything else, so a `Viewport` value can always be mapped to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewport", into = "RawViewport")]
pub struct Viewport {
    x: Range,
    y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Result<Self, ViewportError> {
        Ok(Self {
            x: x.validate(Axis::X)?,
            y: y.validate(Axis::Y)?,
        })
    }

    /// Create a viewport from its four bounds.
    pub fn from_bounds(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<Self, ViewportError> {
        Self::new(Range::new(x_min, x_max), Range::new(y_min, y_max))
    }

    /// X axis range.
    pub fn x(&self) -> Range {
        self.x
    }

    /// Y axis range.
    pub fn y(&self) -> Range {
        self.y
    }

    /// Range for the given axis.
    pub fn range(&self, axis: Axis) -> Range {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Width of the X range.
    pub fn width(&self) -> f64 {
        self.x.span()
    }

    /// Height of the Y range.
    pub fn height(&self) -> f64 {
        self.y.span()
    }

    /// Centroid of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x.center(), self.y.center())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: Range::new(-10.0, 10.0),
            y: Range::new(-10.0, 10.0),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawViewport {
    x: Range,
    y: Range,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = ViewportError;

    fn try_from(raw: RawViewport) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y)
    }
}

impl From<Viewport> for RawViewport {
    fn from(viewport: Viewport) -> Self {
        Self {
            x: viewport.x,
            y: viewport.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_inverted_ranges() {
        assert!(matches!(
            Viewport::from_bounds(1.0, 1.0, 0.0, 1.0),
            Err(ViewportError::EmptyRange { axis: Axis::X, .. })
        ));
        assert!(matches!(
            Viewport::from_bounds(0.0, 1.0, 2.0, -2.0),
            Err(ViewportError::EmptyRange { axis: Axis::Y, .. })
        ));
        assert!(matches!(
            Viewport::from_bounds(f64::NEG_INFINITY, 1.0, 0.0, 1.0),
            Err(ViewportError::NonFinite { .. })
        ));
    }

    #[test]
    fn scaled_keeps_center_fixed() {
        let range = Range::new(-2.0, 6.0).scaled(2.0, 0.5);
        assert_eq!(range, Range::new(0.0, 4.0));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Viewport =
            serde_json::from_str(r#"{"x":{"min":-1.0,"max":1.0},"y":{"min":0.0,"max":2.0}}"#)
                .unwrap();
        assert_eq!(ok.center(), Point::new(0.0, 1.0));
        let bad = serde_json::from_str::<Viewport>(
            r#"{"x":{"min":1.0,"max":-1.0},"y":{"min":0.0,"max":2.0}}"#,
        );
        assert!(bad.is_err());
    }
}
