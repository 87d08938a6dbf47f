//! gpui_funcplot graphs explicit (`y = f(x)`) and implicit (`f(x, y) = 0`)
//! equations on a pannable, zoomable Cartesian plane.
//!
//! The core is backend-agnostic and draws through the [`Canvas`] trait.
//! Enable the `gpui` feature for a ready-made GPUI view.

#![forbid(unsafe_code)]

pub mod axis;
pub mod classify;
pub mod config;
pub mod controller;
pub mod curve;
pub mod equation;
pub mod error;
pub mod expr;
pub mod geom;
pub mod graph;
pub mod interaction;
pub mod render;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{Axis, AxisFormatter, GridLine, grid_lines, nice_step};
pub use classify::{Classified, ExplicitCurve, ImplicitCurve, ScalarField, classify};
pub use config::RenderConfig;
pub use controller::{MAX_ZOOM_RANGE, MIN_ZOOM_RANGE, ViewportController};
pub use curve::{Polyline, SampleGrid, march_squares, sample_explicit};
pub use equation::{Equation, EquationId, EquationStore, PALETTE};
pub use error::{ColorParseError, CompileError, EvalError, ViewportError};
pub use expr::{Bindings, BuiltinEvaluator, CompiledExpr, Evaluator};
pub use geom::{Point, ScreenPoint, ScreenRect, Size};
pub use graph::{Graph, GraphBuilder};
pub use interaction::{PointerTracker, pan_delta_from_drag, wheel_zoom_factor, zoom_center};
pub use render::{
    Canvas, Color, Font, FontFamily, Frame, FrameKey, LineSegment, LineStyle, RenderCommand,
    RenderList, Renderer, TextAlign, TextBaseline, TextStyle,
};
pub use style::Theme;
pub use transform::Transform;
pub use view::{Range, Viewport};

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiGraphView, GraphHandle, GraphViewConfig};
