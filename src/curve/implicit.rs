use crate::classify::ScalarField;
use crate::geom::Point;
use crate::render::LineSegment;
use crate::transform::Transform;

/// Edge differences smaller than this interpolate to the edge midpoint.
const FLAT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

use Edge::{Bottom, Left, Right, Top};

/// Segments per corner mask. Bits: 1 bottom-left, 2 bottom-right,
/// 4 top-right, 8 top-left; a bit is set when the corner value is `> 0`.
///
/// Saddles (5 and 10) always join the two positive corners through the
/// cell; no center sample is taken to disambiguate them.
const CASES: [&[(Edge, Edge)]; 16] = [
    &[],
    &[(Left, Bottom)],
    &[(Bottom, Right)],
    &[(Left, Right)],
    &[(Right, Top)],
    &[(Left, Top), (Bottom, Right)],
    &[(Bottom, Top)],
    &[(Left, Top)],
    &[(Top, Left)],
    &[(Bottom, Top)],
    &[(Bottom, Left), (Right, Top)],
    &[(Right, Top)],
    &[(Left, Right)],
    &[(Bottom, Right)],
    &[(Left, Bottom)],
    &[],
];

/// Field values on a `(res_x + 1) × (res_y + 1)` lattice covering a viewport.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    res_x: usize,
    res_y: usize,
    origin: Point,
    dx: f64,
    dy: f64,
    values: Vec<f64>,
}

impl SampleGrid {
    /// Sample `field` on a lattice whose cells are about `cell_px` pixels.
    ///
    /// Returns `None` for a non-positive cell size.
    pub fn sample(field: &dyn ScalarField, transform: &Transform, cell_px: f64) -> Option<Self> {
        if !(cell_px > 0.0) {
            return None;
        }
        let screen = transform.screen();
        let viewport = transform.viewport();
        let res_x = ((screen.width() / cell_px).ceil() as usize).max(1);
        let res_y = ((screen.height() / cell_px).ceil() as usize).max(1);
        let origin = Point::new(viewport.x().min, viewport.y().min);
        let dx = viewport.width() / res_x as f64;
        let dy = viewport.height() / res_y as f64;

        let mut values = Vec::with_capacity((res_x + 1) * (res_y + 1));
        for i in 0..=res_x {
            let x = origin.x + i as f64 * dx;
            for j in 0..=res_y {
                let y = origin.y + j as f64 * dy;
                let value = field.value(x, y);
                values.push(if value.is_nan() { f64::NAN } else { value });
            }
        }

        Some(Self {
            res_x,
            res_y,
            origin,
            dx,
            dy,
            values,
        })
    }

    /// Number of cells along X and Y.
    pub fn resolution(&self) -> (usize, usize) {
        (self.res_x, self.res_y)
    }

    /// Math-space size of one cell.
    pub fn cell_size(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Value at lattice corner `(i, j)`, counted from the bottom-left.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i * (self.res_y + 1) + j]
    }

    /// Zero-crossing segments in math space.
    pub fn contour(&self) -> Vec<(Point, Point)> {
        let mut out = Vec::new();
        for i in 0..self.res_x {
            for j in 0..self.res_y {
                let corners = [
                    self.value(i, j),
                    self.value(i + 1, j),
                    self.value(i + 1, j + 1),
                    self.value(i, j + 1),
                ];
                let origin = Point::new(
                    self.origin.x + i as f64 * self.dx,
                    self.origin.y + j as f64 * self.dy,
                );
                contour_cell(corners, origin, self.dx, self.dy, &mut out);
            }
        }
        out
    }
}

/// Extract the zero set of `field` as pixel-space segments.
pub fn march_squares(
    field: &dyn ScalarField,
    transform: &Transform,
    cell_px: f64,
) -> Vec<LineSegment> {
    let Some(grid) = SampleGrid::sample(field, transform, cell_px) else {
        return Vec::new();
    };
    grid.contour()
        .into_iter()
        .map(|(start, end)| LineSegment::new(transform.to_pixel(start), transform.to_pixel(end)))
        .collect()
}

/// Corners are bottom-left, bottom-right, top-right, top-left.
fn contour_cell(corners: [f64; 4], origin: Point, dx: f64, dy: f64, out: &mut Vec<(Point, Point)>) {
    if corners.iter().any(|value| value.is_nan()) {
        return;
    }
    let mask = corners
        .iter()
        .enumerate()
        .fold(0usize, |mask, (bit, value)| {
            if *value > 0.0 { mask | (1 << bit) } else { mask }
        });

    let [v00, v10, v11, v01] = corners;
    let crossing = |edge: Edge| match edge {
        Bottom => Point::new(origin.x + dx * interpolate(v00, v10), origin.y),
        Right => Point::new(origin.x + dx, origin.y + dy * interpolate(v10, v11)),
        Top => Point::new(origin.x + dx * interpolate(v01, v11), origin.y + dy),
        Left => Point::new(origin.x, origin.y + dy * interpolate(v00, v01)),
    };

    for &(a, b) in CASES[mask] {
        out.push((crossing(a), crossing(b)));
    }
}

fn interpolate(v1: f64, v2: f64) -> f64 {
    let delta = v2 - v1;
    if delta.abs() < FLAT_EPSILON {
        return 0.5;
    }
    (0.0 - v1) / delta
}
