use approx::assert_relative_eq;

use gpui_funcplot::{
    BuiltinEvaluator, Classified, Graph, MAX_ZOOM_RANGE, MIN_ZOOM_RANGE, PALETTE, Point,
    RenderList, ScreenPoint, Size, Transform, Viewport, ViewportController, classify,
    march_squares, sample_explicit,
};

fn canvas_transform(viewport: Viewport, width: f64, height: f64) -> Transform {
    Transform::for_canvas(viewport, width, height).expect("non-empty canvas")
}

#[test]
fn pixel_math_round_trip_across_scales() {
    let viewports = [
        Viewport::default(),
        Viewport::from_bounds(-1e-9, 1e-9, 5.0, 5.000001).unwrap(),
        Viewport::from_bounds(-4e11, 6e11, -1e3, 2e3).unwrap(),
    ];
    for viewport in viewports {
        let transform = canvas_transform(viewport, 1280.0, 720.0);
        for (px, py) in [(0.0, 0.0), (640.0, 360.0), (1279.0, 1.0), (17.5, 700.25)] {
            let screen = ScreenPoint::new(px, py);
            let back = transform.to_pixel(transform.to_math(screen));
            assert_relative_eq!(back.x, screen.x, epsilon = 1e-4);
            assert_relative_eq!(back.y, screen.y, epsilon = 1e-4);
        }
    }
}

#[test]
fn zoom_stays_within_limits() {
    let mut controller = ViewportController::default();
    for _ in 0..200 {
        controller.zoom(0.5, None).unwrap();
    }
    assert!(controller.viewport().width() >= MIN_ZOOM_RANGE * (1.0 - 1e-9));
    assert!(controller.viewport().height() >= MIN_ZOOM_RANGE * (1.0 - 1e-9));

    controller.reset();
    for _ in 0..200 {
        controller.zoom(3.0, Some(Point::new(1.0, -2.0))).unwrap();
    }
    assert!(controller.viewport().width() <= MAX_ZOOM_RANGE * (1.0 + 1e-9));
    assert!(controller.viewport().height() <= MAX_ZOOM_RANGE * (1.0 + 1e-9));
}

#[test]
fn pan_there_and_back_is_identity() {
    let mut controller = ViewportController::new(Viewport::from_bounds(-3.0, 7.0, 2.0, 4.0).unwrap());
    let start = controller.viewport();
    controller.pan(2.5, -1.25);
    controller.pan(-2.5, 1.25);
    let end = controller.viewport();
    assert_relative_eq!(end.x().min, start.x().min, epsilon = 1e-12);
    assert_relative_eq!(end.x().max, start.x().max, epsilon = 1e-12);
    assert_relative_eq!(end.y().min, start.y().min, epsilon = 1e-12);
    assert_relative_eq!(end.y().max, start.y().max, epsilon = 1e-12);
}

#[test]
fn circle_segments_lie_on_the_circle() {
    let Classified::Implicit(circle) = classify(&BuiltinEvaluator, "x^2 + y^2 = 4") else {
        panic!("circle should be implicit");
    };
    let viewport = Viewport::from_bounds(-5.0, 5.0, -5.0, 5.0).unwrap();
    let transform = canvas_transform(viewport, 400.0, 400.0);
    let segments = march_squares(&circle, &transform, 6.0);
    assert!(segments.len() > 50);

    let cell = 10.0 / (400.0_f64 / 6.0).ceil();
    let tolerance = cell * std::f64::consts::SQRT_2;
    for segment in &segments {
        for end in [segment.start, segment.end] {
            let radius = transform.to_math(end).norm();
            assert!((radius - 2.0).abs() <= tolerance, "radius {radius}");
        }
    }
}

#[test]
fn reciprocal_has_no_segment_across_zero() {
    let viewport = Viewport::default();
    let transform = canvas_transform(viewport, 401.0, 300.0);
    let zero_px = transform.to_pixel(Point::new(0.0, 0.0)).x;
    let runs = sample_explicit(|x| 1.0 / x, &transform, 2);
    assert!(runs.len() >= 2);
    for run in &runs {
        for pair in run.windows(2) {
            let crosses = pair[0].x < zero_px && pair[1].x > zero_px;
            assert!(!crosses, "segment crosses the pole at {zero_px}");
        }
    }
}

#[test]
fn classification_follows_equals_sign() {
    let evaluator = BuiltinEvaluator;
    assert!(matches!(classify(&evaluator, "x^2"), Classified::Explicit(_)));
    assert!(matches!(classify(&evaluator, "y = x^2"), Classified::Implicit(_)));
    assert!(matches!(classify(&evaluator, "x^^2"), Classified::Invalid(_)));
}

#[test]
fn one_bad_equation_does_not_block_the_rest() {
    let mut graph = Graph::builder()
        .equation("sin(x)")
        .equation("x^^2")
        .equation("x^2 + y^2 = 9")
        .build();
    let ids: Vec<_> = graph.equations().iter().map(|equation| equation.id()).collect();
    let frame = graph.build_frame(Size::new(500.0, 500.0));

    assert_eq!(frame.list.paths_with_color(PALETTE[0]).count(), 1);
    assert_eq!(frame.list.paths_with_color(PALETTE[1]).count(), 0);
    assert_eq!(frame.list.paths_with_color(PALETTE[2]).count(), 1);
    assert!(graph.equation_error(ids[0]).is_none());
    assert!(graph.equation_error(ids[1]).is_some());
    assert!(graph.equation_error(ids[2]).is_none());
}

#[test]
fn zero_size_canvas_records_nothing() {
    let mut graph = Graph::builder().equation("x").build();
    let mut list = RenderList::new();
    graph.render(&mut list, Size::new(0.0, 0.0));
    assert!(list.commands().is_empty());
    graph.render(&mut list, Size::new(300.0, 0.0));
    assert!(list.commands().is_empty());
}

#[test]
fn last_submitted_frame_wins() {
    let mut graph = Graph::builder().equation("x^3 - x").build();
    let size = Size::new(640.0, 480.0);

    let first = graph.build_frame(size);
    graph.zoom(0.5, None).unwrap();
    let second = graph.build_frame(size);

    assert!(!graph.is_current(&first.key));
    assert!(graph.is_current(&second.key));
    assert_ne!(first.key, second.key);

    let id = graph.equations().iter().next().map(|equation| equation.id()).unwrap();
    graph.toggle_equation(id);
    assert!(!graph.is_current(&second.key));
}

#[test]
fn render_config_round_trips_through_json() {
    let mut graph = Graph::new();
    let mut config = graph.config().clone();
    config.device_pixel_ratio = 2.0;
    let json = serde_json::to_string(&config).unwrap();
    let parsed = serde_json::from_str(&json).unwrap();
    graph.set_config(parsed);
    assert_eq!(graph.config().device_pixel_ratio, 2.0);
}
