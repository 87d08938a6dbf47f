use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{
    Bounds, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point,
    ScrollWheelEvent, Window, canvas, div, px,
};

use crate::geom::{ScreenPoint, ScreenRect, Size};
use crate::graph::Graph;
use crate::interaction::{PointerTracker, pan_delta_from_drag, wheel_zoom_factor, zoom_center};
use crate::transform::Transform;

use super::config::GraphViewConfig;
use super::paint::{paint_list, to_hsla};

#[derive(Debug, Default)]
struct ViewState {
    tracker: PointerTracker,
    bounds: Option<ScreenRect>,
}

/// A GPUI view that renders a [`Graph`] with drag-to-pan and wheel zoom.
///
/// Every handled event calls `cx.notify()`; GPUI coalesces notifications
/// into one repaint per frame, which always reflects the latest state.
#[derive(Clone)]
pub struct GpuiGraphView {
    graph: Arc<RwLock<Graph>>,
    state: Arc<RwLock<ViewState>>,
    config: GraphViewConfig,
}

impl GpuiGraphView {
    /// Create a new GPUI graph view.
    ///
    /// Uses the default [`GraphViewConfig`].
    pub fn new(graph: Graph) -> Self {
        Self::with_config(graph, GraphViewConfig::default())
    }

    /// Create a new GPUI graph view with a custom configuration.
    pub fn with_config(graph: Graph, config: GraphViewConfig) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            state: Arc::new(RwLock::new(ViewState::default())),
            config,
        }
    }

    /// Get a handle for mutating the underlying graph.
    pub fn graph_handle(&self) -> GraphHandle {
        GraphHandle {
            graph: Arc::clone(&self.graph),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().expect("graph state lock");
        if !state.bounds.is_some_and(|bounds| bounds.contains(pos)) {
            return;
        }

        if ev.click_count >= 2 && self.config.double_click_reset {
            state.tracker.release();
            self.graph.write().expect("graph lock").reset_view();
            cx.notify();
            return;
        }

        state.tracker.press(pos);
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().expect("graph state lock");
        let Some(bounds) = state.bounds else {
            return;
        };
        if ev.pressed_button != Some(MouseButton::Left) {
            state.tracker.release();
            return;
        }
        let Some(delta) = state.tracker.drag_to(pos) else {
            return;
        };

        let mut graph = self.graph.write().expect("graph lock");
        let (dx, dy) = pan_delta_from_drag(delta, graph.viewport(), bounds.width(), bounds.height());
        graph.pan(dx, dy);
        cx.notify();
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let mut state = self.state.write().expect("graph state lock");
        if state.tracker.is_pressed() {
            state.tracker.release();
            cx.notify();
        }
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let state = self.state.read().expect("graph state lock");
        let Some(bounds) = state.bounds.filter(|bounds| bounds.contains(pos)) else {
            return;
        };

        let delta = ev.delta.pixel_delta(px(self.config.scroll_line_height_px));
        // GPUI reports positive Y when scrolling up; zoom out on scroll down.
        let wheel = -f64::from(f32::from(delta.y));
        let Some(factor) = wheel_zoom_factor(wheel, self.config.zoom_intensity) else {
            return;
        };

        let mut graph = self.graph.write().expect("graph lock");
        let Some(transform) = Transform::new(graph.viewport(), bounds) else {
            return;
        };
        let center = zoom_center(&transform, pos);
        if let Err(err) = graph.zoom(factor, Some(center)) {
            tracing::warn!(%err, "ignoring wheel zoom");
            return;
        }
        cx.notify();
    }
}

impl Render for GpuiGraphView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let graph = Arc::clone(&self.graph);
        let state = Arc::clone(&self.state);
        let theme = graph.read().expect("graph lock").theme().clone();

        div()
            .size_full()
            .bg(to_hsla(theme.background))
            .child(
                canvas(
                    move |bounds, _, _| {
                        let rect = screen_rect(bounds);
                        state.write().expect("graph state lock").bounds = Some(rect);
                        let size = Size::new(rect.width(), rect.height());
                        graph.write().expect("graph lock").build_frame(size)
                    },
                    move |bounds, frame, window, cx| {
                        paint_list(&frame.list, bounds, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                this.on_scroll(ev, cx);
            }))
    }
}

/// A handle for mutating a [`Graph`] held inside a `GpuiGraphView`.
///
/// The handle clones cheaply. Call `cx.notify()` on the view after writing
/// so the change is repainted.
#[derive(Clone)]
pub struct GraphHandle {
    graph: Arc<RwLock<Graph>>,
}

impl GraphHandle {
    /// Read the graph state.
    ///
    /// The graph is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        let graph = self.graph.read().expect("graph lock");
        f(&graph)
    }

    /// Mutate the graph state.
    ///
    /// The graph is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        let mut graph = self.graph.write().expect("graph lock");
        f(&mut graph)
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f64::from(f32::from(point.x)), f64::from(f32::from(point.y)))
}

fn screen_rect(bounds: Bounds<Pixels>) -> ScreenRect {
    ScreenRect::new(
        screen_point(bounds.origin),
        screen_point(bounds.bottom_right()),
    )
}
