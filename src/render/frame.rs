use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use super::{Canvas, Font, FontFamily, RenderList, TextAlign, TextBaseline, clip_polyline};
use crate::axis::{AxisFormatter, GridLine, grid_lines, nice_step};
use crate::classify::{Classified, classify};
use crate::config::RenderConfig;
use crate::curve::{march_squares, sample_explicit};
use crate::equation::{Equation, EquationId};
use crate::error::CompileError;
use crate::expr::{BuiltinEvaluator, Evaluator};
use crate::geom::{Point, ScreenPoint, Size};
use crate::style::Theme;
use crate::transform::Transform;
use crate::view::Viewport;

const MAX_GRID_LINES: usize = 1000;

/// Identity of the inputs a frame was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameKey {
    /// Viewport generation at build time.
    pub viewport_generation: u64,
    /// Equation and theme generation at build time.
    pub equations_generation: u64,
    /// Canvas size at build time.
    pub size: Size,
}

/// A recorded frame ready for a backend to replay.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Inputs the frame reflects.
    pub key: FrameKey,
    /// Recorded draw commands.
    pub list: RenderList,
}

struct CachedCurve {
    source: String,
    classified: Classified,
}

/// Draws the grid and every visible equation onto a [`Canvas`].
///
/// Compiled expressions are cached per equation id and rebuilt only when
/// the expression text changes.
pub struct Renderer {
    evaluator: Arc<dyn Evaluator>,
    config: RenderConfig,
    formatter: AxisFormatter,
    cache: HashMap<EquationId, CachedCurve>,
}

impl Renderer {
    /// Create a renderer compiling through `evaluator`.
    pub fn new(evaluator: Arc<dyn Evaluator>, config: RenderConfig) -> Self {
        Self {
            evaluator,
            config,
            formatter: AxisFormatter::default(),
            cache: HashMap::new(),
        }
    }

    /// Access the render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the render configuration.
    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    /// Replace the tick label formatter.
    pub fn set_formatter(&mut self, formatter: AxisFormatter) {
        self.formatter = formatter;
    }

    /// Replace the evaluator and drop every cached compilation.
    pub fn set_evaluator(&mut self, evaluator: Arc<dyn Evaluator>) {
        self.evaluator = evaluator;
        self.cache.clear();
    }

    /// Compile error from the last render of equation `id`, if any.
    pub fn compile_error(&self, id: EquationId) -> Option<&CompileError> {
        self.cache
            .get(&id)
            .and_then(|cached| cached.classified.error())
    }

    /// Draw one frame.
    ///
    /// A zero-size canvas draws nothing, not even `clear`. Equations that
    /// fail to compile are skipped; the rest are drawn in order.
    pub fn render(
        &mut self,
        canvas: &mut dyn Canvas,
        viewport: Viewport,
        size: Size,
        equations: &[Equation],
        theme: &Theme,
    ) {
        let Some(transform) = Transform::for_canvas(viewport, size.width, size.height) else {
            tracing::trace!(?size, "skipping empty canvas");
            return;
        };

        canvas.clear(size.width, size.height);
        self.draw_grid(canvas, &transform, theme);

        self.cache
            .retain(|id, _| equations.iter().any(|equation| equation.id() == *id));

        let clip = transform.screen().inflate(self.config.clip_margin_px);
        let mut drawn = 0usize;
        let mut pieces = 0usize;
        for equation in equations.iter().filter(|equation| equation.is_visible()) {
            let classified = compile_cached(&mut self.cache, self.evaluator.as_ref(), equation);
            canvas.begin_path();
            match classified {
                Classified::Invalid(_) => continue,
                Classified::Implicit(curve) => {
                    for segment in march_squares(curve, &transform, self.config.cell_size_px) {
                        canvas.move_to(segment.start);
                        canvas.line_to(segment.end);
                        pieces += 1;
                    }
                }
                Classified::Explicit(curve) => {
                    let runs =
                        sample_explicit(|x| curve.eval(x), &transform, self.config.explicit_stride_px);
                    for run in runs {
                        for piece in clip_polyline(&run, clip) {
                            trace_polyline(canvas, &piece);
                            pieces += 1;
                        }
                    }
                }
            }
            canvas.set_stroke_style(equation.color());
            canvas.set_line_width(self.config.curve_line_width);
            canvas.stroke();
            drawn += 1;
        }

        tracing::trace!(drawn, pieces, ?size, "rendered frame");
    }

    fn draw_grid(&self, canvas: &mut dyn Canvas, transform: &Transform, theme: &Theme) {
        let dpr = self.config.device_pixel_ratio;
        let spacing = self.config.grid_spacing_px * dpr;
        let screen = transform.screen();
        let viewport = transform.viewport();

        let x_step = nice_step(spacing / transform.pixels_per_unit_x());
        let y_step = nice_step(spacing / transform.pixels_per_unit_y());
        let x_lines = x_step
            .map(|step| grid_lines(viewport.x().min, viewport.x().max, step, MAX_GRID_LINES))
            .unwrap_or_default();
        let y_lines = y_step
            .map(|step| grid_lines(viewport.y().min, viewport.y().max, step, MAX_GRID_LINES))
            .unwrap_or_default();

        let x_pixel = |value: f64| transform.to_pixel(Point::new(value, viewport.y().min)).x;
        let y_pixel = |value: f64| transform.y_to_pixel(value);

        for is_axis in [false, true] {
            canvas.begin_path();
            for line in x_lines.iter().filter(|line| line.is_axis == is_axis) {
                let px = x_pixel(line.value);
                canvas.move_to(ScreenPoint::new(px, screen.min.y));
                canvas.line_to(ScreenPoint::new(px, screen.max.y));
            }
            for line in y_lines.iter().filter(|line| line.is_axis == is_axis) {
                let py = y_pixel(line.value);
                canvas.move_to(ScreenPoint::new(screen.min.x, py));
                canvas.line_to(ScreenPoint::new(screen.max.x, py));
            }
            let (color, width) = if is_axis {
                (theme.axis, self.config.axis_line_width)
            } else {
                (theme.grid, self.config.grid_line_width)
            };
            canvas.set_stroke_style(color);
            canvas.set_line_width(width);
            canvas.stroke();
        }

        canvas.set_font(Font {
            size: self.config.label_font_size * dpr as f32,
            family: FontFamily::Monospace,
        });
        canvas.set_fill_style(theme.label);

        if let Some(step) = x_step {
            canvas.set_text_align(TextAlign::Center);
            canvas.set_text_baseline(TextBaseline::Top);
            let py = screen.max.y - 20.0 * dpr;
            self.draw_labels(canvas, &x_lines, step, |value| {
                ScreenPoint::new(x_pixel(value), py)
            });
        }
        if let Some(step) = y_step {
            canvas.set_text_align(TextAlign::Right);
            canvas.set_text_baseline(TextBaseline::Middle);
            let px = screen.max.x - 10.0 * dpr;
            self.draw_labels(canvas, &y_lines, step, |value| {
                ScreenPoint::new(px, y_pixel(value))
            });
        }
    }

    fn draw_labels(
        &self,
        canvas: &mut dyn Canvas,
        lines: &[GridLine],
        step: f64,
        position: impl Fn(f64) -> ScreenPoint,
    ) {
        for line in lines.iter().filter(|line| !line.is_axis) {
            let text = self.formatter.format(line.value, step);
            canvas.fill_text(&text, position(line.value));
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinEvaluator), RenderConfig::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("formatter", &self.formatter)
            .field("cached", &self.cache.len())
            .finish()
    }
}

fn compile_cached<'a>(
    cache: &'a mut HashMap<EquationId, CachedCurve>,
    evaluator: &dyn Evaluator,
    equation: &Equation,
) -> &'a Classified {
    let compile = || {
        let classified = classify(evaluator, equation.expression());
        if let Some(err) = classified.error() {
            tracing::debug!(
                id = ?equation.id(),
                expression = equation.expression(),
                %err,
                "equation skipped"
            );
        }
        CachedCurve {
            source: equation.expression().to_string(),
            classified,
        }
    };

    match cache.entry(equation.id()) {
        Entry::Occupied(mut slot) => {
            if slot.get().source != equation.expression() {
                tracing::debug!(id = ?equation.id(), "recompiling equation");
                *slot.get_mut() = compile();
            }
            &slot.into_mut().classified
        }
        Entry::Vacant(slot) => &slot.insert(compile()).classified,
    }
}

fn trace_polyline(canvas: &mut dyn Canvas, points: &[ScreenPoint]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    canvas.move_to(*first);
    for point in rest {
        canvas.line_to(*point);
    }
}
