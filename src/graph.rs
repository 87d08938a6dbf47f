//! Graph entry points and builders.

use std::sync::Arc;

use crate::axis::AxisFormatter;
use crate::config::RenderConfig;
use crate::controller::ViewportController;
use crate::equation::{Equation, EquationId, EquationStore};
use crate::error::{ColorParseError, CompileError, ViewportError};
use crate::expr::{BuiltinEvaluator, Evaluator};
use crate::geom::{Point, Size};
use crate::render::{Canvas, Color, Frame, FrameKey, RenderList, Renderer};
use crate::style::Theme;
use crate::view::Viewport;

/// Equations, viewport and styling for one graph surface.
#[derive(Debug)]
pub struct Graph {
    controller: ViewportController,
    equations: EquationStore,
    theme: Theme,
    renderer: Renderer,
}

impl Graph {
    /// Create a graph with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a graph with custom configuration.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.equations.touch();
    }

    /// Access the render configuration.
    pub fn config(&self) -> &RenderConfig {
        self.renderer.config()
    }

    /// Replace the render configuration.
    pub fn set_config(&mut self, config: RenderConfig) {
        self.renderer.set_config(config);
        self.equations.touch();
    }

    /// Access the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.controller.viewport()
    }

    /// Access the viewport controller.
    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    /// Mutable access to the viewport controller.
    pub fn controller_mut(&mut self) -> &mut ViewportController {
        &mut self.controller
    }

    /// Access the equation store.
    pub fn equations(&self) -> &EquationStore {
        &self.equations
    }

    /// Mutable access to the equation store.
    pub fn equations_mut(&mut self) -> &mut EquationStore {
        &mut self.equations
    }

    /// Move the content by a math-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.controller.pan(dx, dy);
    }

    /// Zoom by `factor` around `center`, or around the viewport centroid.
    pub fn zoom(&mut self, factor: f64, center: Option<Point>) -> Result<(), ViewportError> {
        self.controller.zoom(factor, center)
    }

    /// Replace the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.controller.set_viewport(viewport);
    }

    /// Restore the default viewport.
    pub fn reset_view(&mut self) {
        self.controller.reset();
    }

    /// Append an equation.
    pub fn add_equation(&mut self, expression: impl Into<String>) -> EquationId {
        self.equations.add(expression)
    }

    /// Remove an equation.
    pub fn remove_equation(&mut self, id: EquationId) -> bool {
        self.equations.remove(id)
    }

    /// Replace an equation's expression.
    pub fn update_equation(&mut self, id: EquationId, expression: impl Into<String>) -> bool {
        self.equations.update_expression(id, expression)
    }

    /// Set an equation's color.
    pub fn set_equation_color(&mut self, id: EquationId, color: Color) -> bool {
        self.equations.set_color(id, color)
    }

    /// Set an equation's color from a hex string.
    pub fn set_equation_color_hex(
        &mut self,
        id: EquationId,
        hex: &str,
    ) -> Result<bool, ColorParseError> {
        self.equations.set_color_hex(id, hex)
    }

    /// Flip an equation's visibility.
    pub fn toggle_equation(&mut self, id: EquationId) -> bool {
        self.equations.toggle_visibility(id)
    }

    /// Look up an equation.
    pub fn equation(&self, id: EquationId) -> Option<&Equation> {
        self.equations.get(id)
    }

    /// Compile error recorded for an equation by the last render.
    pub fn equation_error(&self, id: EquationId) -> Option<&CompileError> {
        self.renderer.compile_error(id)
    }

    /// Replace the tick label formatter.
    pub fn set_formatter(&mut self, formatter: AxisFormatter) {
        self.renderer.set_formatter(formatter);
        self.equations.touch();
    }

    /// Draw the graph onto `canvas`.
    pub fn render(&mut self, canvas: &mut dyn Canvas, size: Size) {
        self.renderer.render(
            canvas,
            self.controller.viewport(),
            size,
            self.equations.as_slice(),
            &self.theme,
        );
    }

    /// Key describing the current inputs at `size`.
    pub fn frame_key(&self, size: Size) -> FrameKey {
        FrameKey {
            viewport_generation: self.controller.generation(),
            equations_generation: self.equations.generation(),
            size,
        }
    }

    /// Record a frame for the current state.
    pub fn build_frame(&mut self, size: Size) -> Frame {
        let key = self.frame_key(size);
        let mut list = RenderList::new();
        self.render(&mut list, size);
        Frame { key, list }
    }

    /// Check whether a frame built with `key` still reflects the graph.
    ///
    /// Frames built for an older viewport or equation set are stale and
    /// should be dropped instead of painted.
    pub fn is_current(&self, key: &FrameKey) -> bool {
        key.viewport_generation == self.controller.generation()
            && key.equations_generation == self.equations.generation()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a graph before construction.
pub struct GraphBuilder {
    theme: Theme,
    config: RenderConfig,
    viewport: Viewport,
    evaluator: Arc<dyn Evaluator>,
    formatter: AxisFormatter,
    equations: Vec<String>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            config: RenderConfig::default(),
            viewport: Viewport::default(),
            evaluator: Arc::new(BuiltinEvaluator),
            formatter: AxisFormatter::default(),
            equations: Vec::new(),
        }
    }
}

impl GraphBuilder {
    /// Set the theme used by the graph.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the render configuration.
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial viewport.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Compile expressions with a custom evaluator.
    pub fn evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Set the tick label formatter.
    pub fn formatter(mut self, formatter: AxisFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Add an equation to the graph.
    pub fn equation(mut self, expression: impl Into<String>) -> Self {
        self.equations.push(expression.into());
        self
    }

    /// Build the graph.
    pub fn build(self) -> Graph {
        let mut renderer = Renderer::new(self.evaluator, self.config);
        renderer.set_formatter(self.formatter);
        let mut equations = EquationStore::new();
        for expression in self.equations {
            equations.add(expression);
        }
        Graph {
            controller: ViewportController::new(self.viewport),
            equations,
            theme: self.theme,
            renderer,
        }
    }
}

impl std::fmt::Debug for GraphBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("theme", &self.theme)
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("equations", &self.equations)
            .finish()
    }
}
