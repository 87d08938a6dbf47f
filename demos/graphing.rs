use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use tracing_subscriber::EnvFilter;

use gpui_funcplot::{GpuiGraphView, Graph, Theme, Viewport};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(800.0), px(600.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let viewport = Viewport::from_bounds(-8.0, 8.0, -6.0, 6.0).unwrap();
            let graph = Graph::builder()
                .theme(Theme::dark())
                .viewport(viewport)
                .equation("sin(x)")
                .equation("1/x")
                .equation("x^2 + y^2 = 16")
                .equation("y^2 = x^3 - 4x")
                .equation("sin(x y) = 0.5")
                .build();

            let view = GpuiGraphView::new(graph);
            cx.new(|_| view)
        })
        .unwrap();
    });
}
