//! Curve extraction: pixel-space geometry from scalar fields.
//!
//! Implicit curves use marching squares over a grid sized in pixels, so the
//! grid gets finer in math space as the view zooms in. Explicit curves are
//! sampled once per pixel stride along X.

mod explicit;
mod implicit;

pub use explicit::sample_explicit;
pub use implicit::{SampleGrid, march_squares};

use crate::geom::ScreenPoint;

/// A connected run of screen-space points.
pub type Polyline = Vec<ScreenPoint>;
